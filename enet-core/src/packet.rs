//! Packet value type: an owned byte payload plus its delivery flags. Bytes
//! are copied in on construction and copied out on access, so a packet never
//! aliases a native buffer (or anyone else's) in either direction.

use bitflags::bitflags;

use crate::abi::{ENET_PACKET_FLAG_RELIABLE, ENET_PACKET_FLAG_UNSEQUENCED};

bitflags! {
    /// Delivery flags. Bit values are fixed by the native protocol; the two
    /// bits are independent of each other.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PacketFlags: u32 {
        /// Acknowledged, ordered delivery.
        const RELIABLE = ENET_PACKET_FLAG_RELIABLE;
        /// No ordering guarantee for this packet.
        const UNSEQUENCED = ENET_PACKET_FLAG_UNSEQUENCED;
    }
}

/// Immutable payload + flag set.
#[derive(Debug, Clone)]
pub struct Packet {
    data: Vec<u8>,
    flags: PacketFlags,
}

impl Packet {
    /// Build a packet from a caller-owned byte slice. The bytes are copied;
    /// later mutation of the source does not affect the packet.
    pub fn new(data: &[u8], flags: PacketFlags) -> Packet {
        Packet {
            data: data.to_vec(),
            flags,
        }
    }

    /// Wrap bytes already copied out of native memory (classifier path).
    pub(crate) fn from_owned(data: Vec<u8>, flags: PacketFlags) -> Packet {
        Packet { data, flags }
    }

    /// Independent copy of the payload; each call returns a fresh buffer.
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn flags(&self) -> PacketFlags {
        self.flags
    }

    /// Payload borrowed for a send call; not part of the copy-out surface.
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.data
    }
}
