//! Borrowed view of a native peer record. A `Peer` is only handed out
//! inside an event's scope, never stored, and never owns or frees native
//! memory; the lifetime parameter pins it to the borrow it was derived from.

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::abi::ENetPeer;
use crate::address::Address;
use crate::packet::Packet;
use crate::sys::EngineApi;

/// Non-owning handle to a connected remote endpoint.
///
/// Identity is the native record's address: two handles compare equal iff
/// they view the same record. There is no stable identity across sessions
/// beyond `connect_id()` + `address()`.
#[derive(Clone, Copy)]
pub struct Peer<'a> {
    raw: NonNull<ENetPeer>,
    api: &'a EngineApi,
}

impl<'a> Peer<'a> {
    /// View an engine-owned record. Returns `None` for a null pointer.
    pub(crate) fn from_raw(raw: *mut ENetPeer, api: &'a EngineApi) -> Option<Peer<'a>> {
        NonNull::new(raw).map(|raw| Peer { raw, api })
    }

    /// The peer's remote address, read from the record.
    pub fn address(&self) -> Address {
        Address::from_raw(unsafe { (*self.raw.as_ptr()).address })
    }

    /// Connection id assigned during the handshake.
    pub fn connect_id(&self) -> u32 {
        unsafe { (*self.raw.as_ptr()).connectID }
    }

    /// Queue a packet for delivery on `channel_id`.
    ///
    /// The payload is handed to the engine as a fresh native packet (the
    /// engine takes ownership on a successful queue). `false` covers every
    /// failure the engine reports: peer not connected, no queue space, or
    /// packet rejected; the engine does not distinguish them and neither
    /// does this layer.
    pub fn send(&self, channel_id: u8, packet: &Packet) -> bool {
        let bytes = packet.bytes();
        let native = unsafe {
            (self.api.packet_create)(
                bytes.as_ptr() as *const c_void,
                bytes.len(),
                packet.flags().bits(),
            )
        };
        if native.is_null() {
            return false;
        }
        let status = unsafe { (self.api.peer_send)(self.raw.as_ptr(), channel_id, native) };
        if status < 0 {
            // Ownership never transferred; release the orphaned packet.
            unsafe { (self.api.packet_destroy)(native) };
            tracing::debug!(channel_id, status, "peer send refused");
            return false;
        }
        true
    }
}

impl PartialEq for Peer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Peer<'_> {}

impl std::fmt::Debug for Peer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peer")
            .field("address", &self.address())
            .field("connect_id", &self.connect_id())
            .finish()
    }
}
