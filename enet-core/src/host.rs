//! Host: one native engine instance bound to a local address, plus the
//! blocking service loop that drives event delivery.
//!
//! All operations on a host must stay on one thread; the loop occupies its
//! caller for the life of the host and suspends only inside the poll call,
//! bounded by the timeout. Cross-thread senders must marshal their data into
//! this thread instead of touching the host or its peers directly.

use std::os::raw::c_int;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::abi::{ENetEvent, ENetHost};
use crate::address::Address;
use crate::event::{classify, Event, EventDecodeError};
use crate::peer::Peer;
use crate::packet::Packet;
use crate::sys::{Engine, EngineApi, InitError, InitGuard};

/// Default poll timeout for the service loop, in milliseconds.
pub const DEFAULT_SERVICE_TIMEOUT_MS: u32 = 1000;

/// Application callbacks, invoked synchronously from the service thread.
/// Exactly one of these runs per decoded event, before the next poll. The
/// peer and packet arguments are only valid for the duration of the call.
pub trait EventHandler {
    fn on_connect(&mut self, peer: &Peer<'_>, data: u32);
    fn on_disconnect(&mut self, peer: &Peer<'_>, data: u32);
    fn on_receive(&mut self, peer: &Peer<'_>, channel_id: u8, packet: &Packet);
}

/// Construction/configuration failures. All fatal; none are retried here.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error("engine returned a null host handle")]
    CreateFailed,
    #[error("unknown checksum algorithm {0:?}")]
    UnknownChecksum(String),
    #[error("unknown compression algorithm {0:?}")]
    UnknownCompressor(String),
    #[error("compression setup failed with status {0}")]
    CompressionSetup(c_int),
    #[error("host is closed")]
    Closed,
}

/// Failures while servicing. A negative poll status is fatal for the host:
/// the loop stops and the caller must close.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("engine service poll failed with status {0}")]
    Failure(c_int),
    #[error(transparent)]
    Decode(#[from] EventDecodeError),
    #[error("host is closed")]
    Closed,
}

/// Narrow seam over the poll call so the loop's classification, dispatch and
/// halting behavior can be driven by a scripted sequence in tests.
pub(crate) trait Poller {
    fn poll(&mut self, record: &mut ENetEvent, timeout_ms: u32) -> c_int;
}

struct NativePoller<'e> {
    api: &'e EngineApi,
    host: *mut ENetHost,
}

impl Poller for NativePoller<'_> {
    fn poll(&mut self, record: &mut ENetEvent, timeout_ms: u32) -> c_int {
        unsafe { (self.api.host_service)(self.host, record, timeout_ms) }
    }
}

/// The service loop. One record is reused across polls and fully consumed
/// (classified, payload copied out) before the next poll overwrites it.
/// Status 0 (timeout, no event) is not an error and triggers nothing.
pub(crate) fn run_service_loop<P, H>(
    poller: &mut P,
    api: &EngineApi,
    handler: &mut H,
    timeout_ms: u32,
    shutdown: &AtomicBool,
) -> Result<(), ServiceError>
where
    P: Poller,
    H: EventHandler,
{
    let mut record = ENetEvent::zeroed();
    while !shutdown.load(Ordering::SeqCst) {
        let status = poller.poll(&mut record, timeout_ms);
        if status == 0 {
            continue;
        }
        if status < 0 {
            tracing::error!(status, "fatal engine status from service poll");
            return Err(ServiceError::Failure(status));
        }
        match unsafe { classify(&record, api) }? {
            Event::None => {}
            Event::Connect { peer, data } => handler.on_connect(&peer, data),
            Event::Disconnect { peer, data } => handler.on_disconnect(&peer, data),
            Event::Receive {
                peer,
                channel_id,
                packet,
            } => handler.on_receive(&peer, channel_id, &packet),
        }
    }
    tracing::debug!("service loop stopped by shutdown flag");
    Ok(())
}

/// One bound engine instance. Owns the native host record exclusively and
/// destroys it exactly once, on `close` or drop, whichever comes first.
pub struct Host {
    engine: Arc<Engine>,
    raw: *mut ENetHost,
    address: Address,
    _guard: InitGuard,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("raw", &self.raw)
            .field("address", &self.address)
            .finish()
    }
}

impl Host {
    /// Bind a host at `address` with the given capacity and bandwidth caps
    /// (0 = unlimited). Acquires the process-wide engine initialization for
    /// as long as the host lives.
    pub fn create(
        engine: &Arc<Engine>,
        address: Address,
        max_peers: usize,
        channel_limit: usize,
        incoming_bandwidth: u32,
        outgoing_bandwidth: u32,
    ) -> Result<Host, HostError> {
        let guard = engine.init()?;
        let raw_address = address.to_raw();
        let raw = unsafe {
            (engine.api().host_create)(
                &raw_address,
                max_peers,
                channel_limit,
                incoming_bandwidth,
                outgoing_bandwidth,
            )
        };
        if raw.is_null() {
            return Err(HostError::CreateFailed);
        }
        let bound = Address::from_raw(unsafe { (*raw).address });
        tracing::info!(address = %bound, max_peers, channel_limit, "host created");
        Ok(Host {
            engine: Arc::clone(engine),
            raw,
            address: bound,
            _guard: guard,
        })
    }

    /// The address the host is bound to.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Select the checksum callback by name ("crc32"). Takes effect for
    /// traffic from the next poll on; configure before servicing.
    pub fn set_checksum(&mut self, algorithm: &str) -> Result<(), HostError> {
        let raw = self.raw_handle()?;
        match algorithm {
            "crc32" => {
                unsafe { (*raw).checksum = Some(self.engine.api().crc32) };
                tracing::debug!(algorithm, "checksum configured");
                Ok(())
            }
            other => Err(HostError::UnknownChecksum(other.to_string())),
        }
    }

    /// Select the compression callback by name ("range_coder"). Configure
    /// before servicing.
    pub fn set_compression(&mut self, algorithm: &str) -> Result<(), HostError> {
        let raw = self.raw_handle()?;
        match algorithm {
            "range_coder" => {
                let status = unsafe { (self.engine.api().host_compress_with_range_coder)(raw) };
                if status < 0 {
                    return Err(HostError::CompressionSetup(status));
                }
                tracing::debug!(algorithm, "compression configured");
                Ok(())
            }
            other => Err(HostError::UnknownCompressor(other.to_string())),
        }
    }

    /// One poll with `timeout_ms`: `Event::None` when nothing happened
    /// within the timeout, a classified event otherwise. A negative engine
    /// status is fatal.
    pub fn service(&mut self, timeout_ms: u32) -> Result<Event<'_>, ServiceError> {
        let raw = self.raw_for_service()?;
        let mut record = ENetEvent::zeroed();
        let status = unsafe { (self.engine.api().host_service)(raw, &mut record, timeout_ms) };
        if status < 0 {
            return Err(ServiceError::Failure(status));
        }
        if status == 0 {
            return Ok(Event::None);
        }
        Ok(unsafe { classify(&record, self.engine.api()) }?)
    }

    /// Run the service loop with the default poll timeout. Blocks the
    /// calling thread until `shutdown` is set or a fatal error surfaces.
    pub fn listen<H: EventHandler>(
        &mut self,
        handler: &mut H,
        shutdown: &AtomicBool,
    ) -> Result<(), ServiceError> {
        self.listen_with(handler, DEFAULT_SERVICE_TIMEOUT_MS, shutdown)
    }

    /// Run the service loop with an explicit poll timeout.
    pub fn listen_with<H: EventHandler>(
        &mut self,
        handler: &mut H,
        timeout_ms: u32,
        shutdown: &AtomicBool,
    ) -> Result<(), ServiceError> {
        let raw = self.raw_for_service()?;
        let api = self.engine.api();
        let mut poller = NativePoller { api, host: raw };
        run_service_loop(&mut poller, api, handler, timeout_ms, shutdown)
    }

    /// Destroy the native host. Idempotent; safe on a host that was never
    /// serviced. After this, servicing and configuration report `Closed`.
    pub fn close(&mut self) {
        if self.raw.is_null() {
            return;
        }
        unsafe { (self.engine.api().host_destroy)(self.raw) };
        self.raw = std::ptr::null_mut();
        tracing::info!(address = %self.address, "host closed");
    }

    fn raw_handle(&self) -> Result<*mut ENetHost, HostError> {
        if self.raw.is_null() {
            return Err(HostError::Closed);
        }
        Ok(self.raw)
    }

    fn raw_for_service(&self) -> Result<*mut ENetHost, ServiceError> {
        if self.raw.is_null() {
            return Err(ServiceError::Closed);
        }
        Ok(self.raw)
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        // Guaranteed release on every exit path; the init guard drops after
        // this, keeping destroy inside the initialize/deinitialize window.
        self.close();
    }
}
