//! Native call surface: loads the engine's shared library and resolves each
//! exported entry point once, up front. A missing library or symbol is a
//! construction error; nothing is resolved lazily at call time.
//!
//! The engine's process-wide `enet_initialize`/`enet_deinitialize` pair is
//! modeled as a mutex-guarded reference count: the first guard initializes,
//! the last one dropped deinitializes, and concurrent callers serialize on
//! the lock.

use std::ffi::c_void;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use libloading::Library;

use crate::abi::{ENetAddress, ENetBuffer, ENetEvent, ENetHost, ENetPacket, ENetPeer};

/// Resolved entry points. Separate from [`Engine`] so code that only needs
/// to call through the table (peer sends, event views, the service loop) can
/// borrow it without touching the library handle.
pub struct EngineApi {
    pub(crate) initialize: unsafe extern "C" fn() -> c_int,
    pub(crate) deinitialize: unsafe extern "C" fn() -> c_int,
    pub(crate) host_create: unsafe extern "C" fn(
        address: *const ENetAddress,
        peer_count: usize,
        channel_limit: usize,
        incoming_bandwidth: u32,
        outgoing_bandwidth: u32,
    ) -> *mut ENetHost,
    pub(crate) host_destroy: unsafe extern "C" fn(host: *mut ENetHost),
    pub(crate) host_service:
        unsafe extern "C" fn(host: *mut ENetHost, event: *mut ENetEvent, timeout: u32) -> c_int,
    pub(crate) host_compress_with_range_coder:
        unsafe extern "C" fn(host: *mut ENetHost) -> c_int,
    pub(crate) packet_create: unsafe extern "C" fn(
        data: *const c_void,
        data_length: usize,
        flags: u32,
    ) -> *mut ENetPacket,
    pub(crate) packet_destroy: unsafe extern "C" fn(packet: *mut ENetPacket),
    pub(crate) peer_send: unsafe extern "C" fn(
        peer: *mut ENetPeer,
        channel_id: u8,
        packet: *mut ENetPacket,
    ) -> c_int,
    pub(crate) crc32:
        unsafe extern "C" fn(buffers: *const ENetBuffer, buffer_count: usize) -> u32,
}

/// The loaded engine: the shared library plus its resolved call table. The
/// library must outlive every resolved function pointer, which holding both
/// in one struct guarantees.
pub struct Engine {
    api: EngineApi,
    // None only for the in-crate test engine built from a stub table.
    _lib: Option<Library>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineLoadError {
    #[error("failed to load engine library {path}: {source}")]
    Open {
        path: PathBuf,
        source: libloading::Error,
    },
    #[error("engine library is missing symbol {name}: {source}")]
    Symbol {
        name: &'static str,
        source: libloading::Error,
    },
    #[error("no engine library found in any configured path")]
    NoCandidate,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("engine initialization failed with status {0}")]
    Failed(c_int),
}

fn resolve<T: Copy>(lib: &Library, name: &'static str) -> Result<T, EngineLoadError> {
    unsafe {
        let symbol: libloading::Symbol<T> = lib
            .get(name.as_bytes())
            .map_err(|source| EngineLoadError::Symbol { name, source })?;
        Ok(*symbol)
    }
}

impl Engine {
    /// Load the engine from `path` and resolve the full call table.
    pub fn load(path: impl AsRef<Path>) -> Result<Engine, EngineLoadError> {
        let path = path.as_ref();
        let lib = unsafe {
            Library::new(path).map_err(|source| EngineLoadError::Open {
                path: path.to_path_buf(),
                source,
            })?
        };
        let api = EngineApi {
            initialize: resolve(&lib, "enet_initialize")?,
            deinitialize: resolve(&lib, "enet_deinitialize")?,
            host_create: resolve(&lib, "enet_host_create")?,
            host_destroy: resolve(&lib, "enet_host_destroy")?,
            host_service: resolve(&lib, "enet_host_service")?,
            host_compress_with_range_coder: resolve(&lib, "enet_host_compress_with_range_coder")?,
            packet_create: resolve(&lib, "enet_packet_create")?,
            packet_destroy: resolve(&lib, "enet_packet_destroy")?,
            peer_send: resolve(&lib, "enet_peer_send")?,
            crc32: resolve(&lib, "enet_crc32")?,
        };
        tracing::debug!(path = %path.display(), "engine library loaded");
        Ok(Engine {
            api,
            _lib: Some(lib),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_api(api: EngineApi) -> Engine {
        Engine { api, _lib: None }
    }

    /// Try each candidate path in order and load the first that opens.
    /// Returns the last open error if none does.
    pub fn load_first<P: AsRef<Path>>(paths: &[P]) -> Result<Engine, EngineLoadError> {
        let mut last_err = EngineLoadError::NoCandidate;
        for path in paths {
            match Engine::load(path) {
                Ok(engine) => return Ok(engine),
                Err(err @ EngineLoadError::Symbol { .. }) => return Err(err),
                Err(err) => last_err = err,
            }
        }
        Err(last_err)
    }

    pub(crate) fn api(&self) -> &EngineApi {
        &self.api
    }

    /// Acquire a slot in the process-wide initialize/deinitialize pairing.
    /// The first live guard runs `enet_initialize`; dropping the last runs
    /// `enet_deinitialize`.
    pub fn init(self: &Arc<Engine>) -> Result<InitGuard, InitError> {
        let mut count = lock_init_count();
        init_locked(&mut count, &self.api)?;
        Ok(InitGuard {
            engine: Arc::clone(self),
        })
    }
}

/// Keeps the engine initialized while alive. Clone-free; acquire one per
/// owner that needs the engine running.
pub struct InitGuard {
    engine: Arc<Engine>,
}

impl Drop for InitGuard {
    fn drop(&mut self) {
        let mut count = lock_init_count();
        deinit_locked(&mut count, &self.engine.api);
    }
}

static INIT_COUNT: Mutex<usize> = Mutex::new(0);

fn lock_init_count() -> std::sync::MutexGuard<'static, usize> {
    match INIT_COUNT.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn init_locked(count: &mut usize, api: &EngineApi) -> Result<(), InitError> {
    if *count == 0 {
        let status = unsafe { (api.initialize)() };
        if status != 0 {
            return Err(InitError::Failed(status));
        }
        tracing::debug!("engine initialized");
    }
    *count += 1;
    Ok(())
}

fn deinit_locked(count: &mut usize, api: &EngineApi) {
    debug_assert!(*count > 0, "unbalanced engine deinitialize");
    *count = count.saturating_sub(1);
    if *count == 0 {
        unsafe { (api.deinitialize)() };
        tracing::debug!("engine deinitialized");
    }
}
