//! Native memory layouts for the ENet engine, mirrored field-for-field from
//! the 1.3.17 public header. Every record the engine hands us (or that we
//! hand it) is read and written through these declarations, so field order,
//! field width and packing must match the native side exactly; the tests at
//! the bottom pin the resulting offsets against the engine's ABI constants.
//!
//! Nothing here allocates or owns native memory. Higher layers decide which
//! pointers may be followed and for how long.

#![allow(non_snake_case)]

use std::ffi::c_void;
use std::mem;
use std::os::raw::c_int;

/// Wildcard host id for binding ("any" local interface).
pub const ENET_HOST_ANY: u32 = 0;

/// Event type tags written by `enet_host_service` into `ENetEvent.type_`.
pub const ENET_EVENT_TYPE_NONE: c_int = 0;
pub const ENET_EVENT_TYPE_CONNECT: c_int = 1;
pub const ENET_EVENT_TYPE_DISCONNECT: c_int = 2;
pub const ENET_EVENT_TYPE_RECEIVE: c_int = 3;

/// Delivery flag bits carried in `ENetPacket.flags`. Fixed by the native
/// protocol; never renumber.
pub const ENET_PACKET_FLAG_RELIABLE: u32 = 0x01;
pub const ENET_PACKET_FLAG_UNSEQUENCED: u32 = 0x10;

/// Peer connection states (`ENetPeer.state`).
pub type ENetPeerState = c_int;
pub const ENET_PEER_STATE_DISCONNECTED: ENetPeerState = 0;
pub const ENET_PEER_STATE_CONNECTING: ENetPeerState = 1;
pub const ENET_PEER_STATE_ACKNOWLEDGING_CONNECT: ENetPeerState = 2;
pub const ENET_PEER_STATE_CONNECTION_PENDING: ENetPeerState = 3;
pub const ENET_PEER_STATE_CONNECTION_SUCCEEDED: ENetPeerState = 4;
pub const ENET_PEER_STATE_CONNECTED: ENetPeerState = 5;
pub const ENET_PEER_STATE_DISCONNECT_LATER: ENetPeerState = 6;
pub const ENET_PEER_STATE_DISCONNECTING: ENetPeerState = 7;
pub const ENET_PEER_STATE_ACKNOWLEDGING_DISCONNECT: ENetPeerState = 8;
pub const ENET_PEER_STATE_ZOMBIE: ENetPeerState = 9;

/// Protocol command numbers (low nibble of a command byte).
pub const ENET_PROTOCOL_COMMAND_NONE: u8 = 0;
pub const ENET_PROTOCOL_COMMAND_ACKNOWLEDGE: u8 = 1;
pub const ENET_PROTOCOL_COMMAND_CONNECT: u8 = 2;
pub const ENET_PROTOCOL_COMMAND_VERIFY_CONNECT: u8 = 3;
pub const ENET_PROTOCOL_COMMAND_DISCONNECT: u8 = 4;
pub const ENET_PROTOCOL_COMMAND_PING: u8 = 5;
pub const ENET_PROTOCOL_COMMAND_SEND_RELIABLE: u8 = 6;
pub const ENET_PROTOCOL_COMMAND_SEND_UNRELIABLE: u8 = 7;
pub const ENET_PROTOCOL_COMMAND_SEND_FRAGMENT: u8 = 8;
pub const ENET_PROTOCOL_COMMAND_SEND_UNSEQUENCED: u8 = 9;
pub const ENET_PROTOCOL_COMMAND_BANDWIDTH_LIMIT: u8 = 10;
pub const ENET_PROTOCOL_COMMAND_THROTTLE_CONFIGURE: u8 = 11;
pub const ENET_PROTOCOL_COMMAND_SEND_UNRELIABLE_FRAGMENT: u8 = 12;
pub const ENET_PROTOCOL_COMMAND_COUNT: u8 = 13;
pub const ENET_PROTOCOL_COMMAND_MASK: u8 = 0x0F;
pub const ENET_PROTOCOL_COMMAND_FLAG_ACKNOWLEDGE: u8 = 1 << 7;
pub const ENET_PROTOCOL_COMMAND_FLAG_UNSEQUENCED: u8 = 1 << 6;

/// Sizing constants baked into the host record.
pub const ENET_PROTOCOL_MAXIMUM_PACKET_COMMANDS: usize = 32;
pub const ENET_PROTOCOL_MAXIMUM_MTU: usize = 4096;
pub const ENET_BUFFER_MAXIMUM: usize = 1 + 2 * ENET_PROTOCOL_MAXIMUM_PACKET_COMMANDS;
pub const ENET_PEER_RELIABLE_WINDOWS: usize = 16;
pub const ENET_PEER_UNSEQUENCED_WINDOW_SIZE: usize = 1024;

/// Socket handle as the unix build of the engine declares it.
pub type ENetSocket = c_int;

pub type ENetChecksumCallback =
    Option<unsafe extern "C" fn(buffers: *const ENetBuffer, bufferCount: usize) -> u32>;
pub type ENetPacketFreeCallback = Option<unsafe extern "C" fn(packet: *mut ENetPacket)>;
pub type ENetInterceptCallback =
    Option<unsafe extern "C" fn(host: *mut ENetHost, event: *mut ENetEvent) -> c_int>;

/// Endpoint address: host id in network byte order plus port.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ENetAddress {
    pub host: u32,
    pub port: u16,
}

/// Scatter/gather buffer as the unix socket layer declares it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ENetBuffer {
    pub data: *mut c_void,
    pub dataLength: usize,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ENetListNode {
    pub next: *mut ENetListNode,
    pub previous: *mut ENetListNode,
}

/// Intrusive doubly-linked list; the engine threads records through these.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ENetList {
    pub sentinel: ENetListNode,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ENetCompressor {
    pub context: *mut c_void,
    pub compress: Option<
        unsafe extern "C" fn(
            context: *mut c_void,
            inBuffers: *const ENetBuffer,
            inBufferCount: usize,
            inLimit: usize,
            outData: *mut u8,
            outLimit: usize,
        ) -> usize,
    >,
    pub decompress: Option<
        unsafe extern "C" fn(
            context: *mut c_void,
            inData: *const u8,
            inLimit: usize,
            outData: *mut u8,
            outLimit: usize,
        ) -> usize,
    >,
    pub destroy: Option<unsafe extern "C" fn(context: *mut c_void)>,
}

/// Packet record. `data`/`dataLength` describe the payload buffer; the
/// reference count and free callback belong to the engine.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ENetPacket {
    pub referenceCount: usize,
    pub flags: u32,
    pub data: *mut u8,
    pub dataLength: usize,
    pub freeCallback: ENetPacketFreeCallback,
    pub userData: *mut c_void,
}

/// One serviced occurrence. The engine rewrites this record on every
/// successful poll; embedded pointers are only valid until the next poll.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ENetEvent {
    pub type_: c_int,
    pub peer: *mut ENetPeer,
    pub channelID: u8,
    pub data: u32,
    pub packet: *mut ENetPacket,
}

impl ENetEvent {
    /// All-zero record (tag = none, null pointers), as handed to a poll.
    pub fn zeroed() -> Self {
        // Plain data: zero is a valid representation for every field.
        unsafe { mem::zeroed() }
    }
}

// Protocol command records. The native header packs all of these (alignment
// 1), so the Rust mirrors must be packed too; read packed fields by value,
// never by reference.

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolCommandHeader {
    pub command: u8,
    pub channelID: u8,
    pub reliableSequenceNumber: u16,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolAcknowledge {
    pub header: ENetProtocolCommandHeader,
    pub receivedReliableSequenceNumber: u16,
    pub receivedSentTime: u16,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolConnect {
    pub header: ENetProtocolCommandHeader,
    pub outgoingPeerID: u16,
    pub incomingSessionID: u8,
    pub outgoingSessionID: u8,
    pub mtu: u32,
    pub windowSize: u32,
    pub channelCount: u32,
    pub incomingBandwidth: u32,
    pub outgoingBandwidth: u32,
    pub packetThrottleInterval: u32,
    pub packetThrottleAcceleration: u32,
    pub packetThrottleDeceleration: u32,
    pub connectID: u32,
    pub data: u32,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolVerifyConnect {
    pub header: ENetProtocolCommandHeader,
    pub outgoingPeerID: u16,
    pub incomingSessionID: u8,
    pub outgoingSessionID: u8,
    pub mtu: u32,
    pub windowSize: u32,
    pub channelCount: u32,
    pub incomingBandwidth: u32,
    pub outgoingBandwidth: u32,
    pub packetThrottleInterval: u32,
    pub packetThrottleAcceleration: u32,
    pub packetThrottleDeceleration: u32,
    pub connectID: u32,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolBandwidthLimit {
    pub header: ENetProtocolCommandHeader,
    pub incomingBandwidth: u32,
    pub outgoingBandwidth: u32,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolThrottleConfigure {
    pub header: ENetProtocolCommandHeader,
    pub packetThrottleInterval: u32,
    pub packetThrottleAcceleration: u32,
    pub packetThrottleDeceleration: u32,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolDisconnect {
    pub header: ENetProtocolCommandHeader,
    pub data: u32,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolPing {
    pub header: ENetProtocolCommandHeader,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolSendReliable {
    pub header: ENetProtocolCommandHeader,
    pub dataLength: u16,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolSendUnreliable {
    pub header: ENetProtocolCommandHeader,
    pub unreliableSequenceNumber: u16,
    pub dataLength: u16,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolSendUnsequenced {
    pub header: ENetProtocolCommandHeader,
    pub unsequencedGroup: u16,
    pub dataLength: u16,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy)]
pub struct ENetProtocolSendFragment {
    pub header: ENetProtocolCommandHeader,
    pub startSequenceNumber: u16,
    pub dataLength: u16,
    pub fragmentCount: u32,
    pub fragmentNumber: u32,
    pub totalLength: u32,
    pub fragmentOffset: u32,
}

/// Protocol command cell: one memory region, one interpretation per command
/// number. 48 bytes (the connect arm), alignment 1.
#[repr(C)]
#[derive(Clone, Copy)]
pub union ENetProtocol {
    pub header: ENetProtocolCommandHeader,
    pub acknowledge: ENetProtocolAcknowledge,
    pub connect: ENetProtocolConnect,
    pub verifyConnect: ENetProtocolVerifyConnect,
    pub disconnect: ENetProtocolDisconnect,
    pub ping: ENetProtocolPing,
    pub sendReliable: ENetProtocolSendReliable,
    pub sendUnreliable: ENetProtocolSendUnreliable,
    pub sendUnsequenced: ENetProtocolSendUnsequenced,
    pub sendFragment: ENetProtocolSendFragment,
    pub bandwidthLimit: ENetProtocolBandwidthLimit,
    pub throttleConfigure: ENetProtocolThrottleConfigure,
}

/// Per-channel sequencing state inside a peer.
#[repr(C)]
pub struct ENetChannel {
    pub outgoingReliableSequenceNumber: u16,
    pub outgoingUnreliableSequenceNumber: u16,
    pub usedReliableWindows: u16,
    pub reliableWindows: [u16; ENET_PEER_RELIABLE_WINDOWS],
    pub incomingReliableSequenceNumber: u16,
    pub incomingUnreliableSequenceNumber: u16,
    pub incomingReliableCommands: ENetList,
    pub incomingUnreliableCommands: ENetList,
}

/// Remote endpoint record. Allocated and owned by the engine inside the
/// host's peer array; this layer only ever borrows it.
#[repr(C)]
pub struct ENetPeer {
    pub dispatchList: ENetListNode,
    pub host: *mut ENetHost,
    pub outgoingPeerID: u16,
    pub incomingPeerID: u16,
    pub connectID: u32,
    pub outgoingSessionID: u8,
    pub incomingSessionID: u8,
    pub address: ENetAddress,
    pub data: *mut c_void,
    pub state: ENetPeerState,
    pub channels: *mut ENetChannel,
    pub channelCount: usize,
    pub incomingBandwidth: u32,
    pub outgoingBandwidth: u32,
    pub incomingBandwidthThrottleEpoch: u32,
    pub outgoingBandwidthThrottleEpoch: u32,
    pub incomingDataTotal: u32,
    pub outgoingDataTotal: u32,
    pub lastSendTime: u32,
    pub lastReceiveTime: u32,
    pub nextTimeout: u32,
    pub earliestTimeout: u32,
    pub packetLossEpoch: u32,
    pub packetsSent: u32,
    pub packetsLost: u32,
    pub packetLoss: u32,
    pub packetLossVariance: u32,
    pub packetThrottle: u32,
    pub packetThrottleLimit: u32,
    pub packetThrottleCounter: u32,
    pub packetThrottleEpoch: u32,
    pub packetThrottleAcceleration: u32,
    pub packetThrottleDeceleration: u32,
    pub packetThrottleInterval: u32,
    pub pingInterval: u32,
    pub timeoutLimit: u32,
    pub timeoutMinimum: u32,
    pub timeoutMaximum: u32,
    pub lastRoundTripTime: u32,
    pub lowestRoundTripTime: u32,
    pub lastRoundTripTimeVariance: u32,
    pub highestRoundTripTimeVariance: u32,
    pub roundTripTime: u32,
    pub roundTripTimeVariance: u32,
    pub mtu: u32,
    pub windowSize: u32,
    pub reliableDataInTransit: u32,
    pub outgoingReliableSequenceNumber: u16,
    pub acknowledgements: ENetList,
    pub sentReliableCommands: ENetList,
    pub sentUnreliableCommands: ENetList,
    pub outgoingCommands: ENetList,
    pub dispatchedCommands: ENetList,
    pub flags: u16,
    pub reserved: u16,
    pub incomingUnsequencedGroup: u16,
    pub outgoingUnsequencedGroup: u16,
    pub unsequencedWindow: [u32; ENET_PEER_UNSEQUENCED_WINDOW_SIZE / 32],
    pub eventData: u32,
    pub totalWaitingData: usize,
}

/// Local endpoint record: the bound socket plus all engine bookkeeping.
/// The only field this layer ever writes is `checksum`; everything else is
/// declared so the record's size and every offset match the engine.
#[repr(C)]
pub struct ENetHost {
    pub socket: ENetSocket,
    pub address: ENetAddress,
    pub incomingBandwidth: u32,
    pub outgoingBandwidth: u32,
    pub bandwidthThrottleEpoch: u32,
    pub mtu: u32,
    pub randomSeed: u32,
    pub recalculateBandwidthLimits: c_int,
    pub peers: *mut ENetPeer,
    pub peerCount: usize,
    pub channelLimit: usize,
    pub serviceTime: u32,
    pub dispatchQueue: ENetList,
    pub continueSending: c_int,
    pub packetSize: usize,
    pub headerFlags: u16,
    pub commands: [ENetProtocol; ENET_PROTOCOL_MAXIMUM_PACKET_COMMANDS],
    pub commandCount: usize,
    pub buffers: [ENetBuffer; ENET_BUFFER_MAXIMUM],
    pub bufferCount: usize,
    pub checksum: ENetChecksumCallback,
    pub compressor: ENetCompressor,
    pub packetData: [[u8; ENET_PROTOCOL_MAXIMUM_MTU]; 2],
    pub receivedAddress: ENetAddress,
    pub receivedData: *mut u8,
    pub receivedDataLength: usize,
    pub totalSentData: u32,
    pub totalSentPackets: u32,
    pub totalReceivedData: u32,
    pub totalReceivedPackets: u32,
    pub intercept: ENetInterceptCallback,
    pub connectedPeers: usize,
    pub bandwidthLimitedPeers: usize,
    pub duplicatePeers: usize,
    pub maximumPacketSize: usize,
    pub maximumWaitingData: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn address_layout() {
        assert_eq!(offset_of!(ENetAddress, host), 0);
        assert_eq!(offset_of!(ENetAddress, port), 4);
        assert_eq!(size_of::<ENetAddress>(), 8);
        assert_eq!(align_of::<ENetAddress>(), 4);
    }

    #[test]
    fn protocol_union_layout() {
        // Packed command structs, so the union is alignment 1 and as wide as
        // the connect arm.
        assert_eq!(size_of::<ENetProtocolCommandHeader>(), 4);
        assert_eq!(size_of::<ENetProtocolAcknowledge>(), 8);
        assert_eq!(size_of::<ENetProtocolConnect>(), 48);
        assert_eq!(size_of::<ENetProtocolVerifyConnect>(), 44);
        assert_eq!(size_of::<ENetProtocolDisconnect>(), 8);
        assert_eq!(size_of::<ENetProtocolPing>(), 4);
        assert_eq!(size_of::<ENetProtocolSendReliable>(), 6);
        assert_eq!(size_of::<ENetProtocolSendUnreliable>(), 8);
        assert_eq!(size_of::<ENetProtocolSendUnsequenced>(), 8);
        assert_eq!(size_of::<ENetProtocolSendFragment>(), 24);
        assert_eq!(size_of::<ENetProtocolBandwidthLimit>(), 12);
        assert_eq!(size_of::<ENetProtocolThrottleConfigure>(), 16);
        assert_eq!(size_of::<ENetProtocol>(), 48);
        assert_eq!(align_of::<ENetProtocol>(), 1);
    }

    #[test]
    fn protocol_union_arms_share_memory() {
        let mut cell: ENetProtocol = unsafe { mem::zeroed() };
        cell.header = ENetProtocolCommandHeader {
            command: ENET_PROTOCOL_COMMAND_DISCONNECT,
            channelID: 3,
            reliableSequenceNumber: 0x1234,
        };
        // Same region through another arm: header fields line up.
        let through_disconnect = unsafe { cell.disconnect.header };
        assert_eq!(through_disconnect.command, ENET_PROTOCOL_COMMAND_DISCONNECT);
        assert_eq!(through_disconnect.channelID, 3);
        assert_eq!({ through_disconnect.reliableSequenceNumber }, 0x1234);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn event_layout_64() {
        assert_eq!(offset_of!(ENetEvent, type_), 0);
        assert_eq!(offset_of!(ENetEvent, peer), 8);
        assert_eq!(offset_of!(ENetEvent, channelID), 16);
        assert_eq!(offset_of!(ENetEvent, data), 20);
        assert_eq!(offset_of!(ENetEvent, packet), 24);
        assert_eq!(size_of::<ENetEvent>(), 32);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn event_layout_32() {
        assert_eq!(offset_of!(ENetEvent, type_), 0);
        assert_eq!(offset_of!(ENetEvent, peer), 4);
        assert_eq!(offset_of!(ENetEvent, channelID), 8);
        assert_eq!(offset_of!(ENetEvent, data), 12);
        assert_eq!(offset_of!(ENetEvent, packet), 16);
        assert_eq!(size_of::<ENetEvent>(), 20);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn packet_layout_64() {
        assert_eq!(offset_of!(ENetPacket, referenceCount), 0);
        assert_eq!(offset_of!(ENetPacket, flags), 8);
        assert_eq!(offset_of!(ENetPacket, data), 16);
        assert_eq!(offset_of!(ENetPacket, dataLength), 24);
        assert_eq!(offset_of!(ENetPacket, freeCallback), 32);
        assert_eq!(offset_of!(ENetPacket, userData), 40);
        assert_eq!(size_of::<ENetPacket>(), 48);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn packet_layout_32() {
        assert_eq!(offset_of!(ENetPacket, referenceCount), 0);
        assert_eq!(offset_of!(ENetPacket, flags), 4);
        assert_eq!(offset_of!(ENetPacket, data), 8);
        assert_eq!(offset_of!(ENetPacket, dataLength), 12);
        assert_eq!(offset_of!(ENetPacket, freeCallback), 16);
        assert_eq!(offset_of!(ENetPacket, userData), 20);
        assert_eq!(size_of::<ENetPacket>(), 24);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn buffer_and_list_layout_64() {
        assert_eq!(offset_of!(ENetBuffer, data), 0);
        assert_eq!(offset_of!(ENetBuffer, dataLength), 8);
        assert_eq!(size_of::<ENetBuffer>(), 16);
        assert_eq!(size_of::<ENetListNode>(), 16);
        assert_eq!(size_of::<ENetList>(), 16);
        assert_eq!(size_of::<ENetCompressor>(), 32);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn channel_layout_64() {
        assert_eq!(offset_of!(ENetChannel, outgoingReliableSequenceNumber), 0);
        assert_eq!(offset_of!(ENetChannel, outgoingUnreliableSequenceNumber), 2);
        assert_eq!(offset_of!(ENetChannel, usedReliableWindows), 4);
        assert_eq!(offset_of!(ENetChannel, reliableWindows), 6);
        assert_eq!(offset_of!(ENetChannel, incomingReliableSequenceNumber), 38);
        assert_eq!(offset_of!(ENetChannel, incomingUnreliableSequenceNumber), 40);
        assert_eq!(offset_of!(ENetChannel, incomingReliableCommands), 48);
        assert_eq!(offset_of!(ENetChannel, incomingUnreliableCommands), 64);
        assert_eq!(size_of::<ENetChannel>(), 80);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn peer_layout_64() {
        assert_eq!(offset_of!(ENetPeer, dispatchList), 0);
        assert_eq!(offset_of!(ENetPeer, host), 16);
        assert_eq!(offset_of!(ENetPeer, outgoingPeerID), 24);
        assert_eq!(offset_of!(ENetPeer, incomingPeerID), 26);
        assert_eq!(offset_of!(ENetPeer, connectID), 28);
        assert_eq!(offset_of!(ENetPeer, outgoingSessionID), 32);
        assert_eq!(offset_of!(ENetPeer, incomingSessionID), 33);
        assert_eq!(offset_of!(ENetPeer, address), 36);
        assert_eq!(offset_of!(ENetPeer, data), 48);
        assert_eq!(offset_of!(ENetPeer, state), 56);
        assert_eq!(offset_of!(ENetPeer, channels), 64);
        assert_eq!(offset_of!(ENetPeer, channelCount), 72);
        assert_eq!(offset_of!(ENetPeer, incomingBandwidth), 80);
        assert_eq!(offset_of!(ENetPeer, reliableDataInTransit), 216);
        assert_eq!(offset_of!(ENetPeer, outgoingReliableSequenceNumber), 220);
        assert_eq!(offset_of!(ENetPeer, acknowledgements), 224);
        assert_eq!(offset_of!(ENetPeer, sentReliableCommands), 240);
        assert_eq!(offset_of!(ENetPeer, sentUnreliableCommands), 256);
        assert_eq!(offset_of!(ENetPeer, outgoingCommands), 272);
        assert_eq!(offset_of!(ENetPeer, dispatchedCommands), 288);
        assert_eq!(offset_of!(ENetPeer, flags), 304);
        assert_eq!(offset_of!(ENetPeer, incomingUnsequencedGroup), 308);
        assert_eq!(offset_of!(ENetPeer, unsequencedWindow), 312);
        assert_eq!(offset_of!(ENetPeer, eventData), 440);
        assert_eq!(offset_of!(ENetPeer, totalWaitingData), 448);
        assert_eq!(size_of::<ENetPeer>(), 456);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn host_layout_64() {
        assert_eq!(offset_of!(ENetHost, socket), 0);
        assert_eq!(offset_of!(ENetHost, address), 4);
        assert_eq!(offset_of!(ENetHost, incomingBandwidth), 12);
        assert_eq!(offset_of!(ENetHost, outgoingBandwidth), 16);
        assert_eq!(offset_of!(ENetHost, bandwidthThrottleEpoch), 20);
        assert_eq!(offset_of!(ENetHost, mtu), 24);
        assert_eq!(offset_of!(ENetHost, randomSeed), 28);
        assert_eq!(offset_of!(ENetHost, recalculateBandwidthLimits), 32);
        assert_eq!(offset_of!(ENetHost, peers), 40);
        assert_eq!(offset_of!(ENetHost, peerCount), 48);
        assert_eq!(offset_of!(ENetHost, channelLimit), 56);
        assert_eq!(offset_of!(ENetHost, serviceTime), 64);
        assert_eq!(offset_of!(ENetHost, dispatchQueue), 72);
        assert_eq!(offset_of!(ENetHost, continueSending), 88);
        assert_eq!(offset_of!(ENetHost, packetSize), 96);
        assert_eq!(offset_of!(ENetHost, headerFlags), 104);
        assert_eq!(offset_of!(ENetHost, commands), 106);
        assert_eq!(offset_of!(ENetHost, commandCount), 1648);
        assert_eq!(offset_of!(ENetHost, buffers), 1656);
        assert_eq!(offset_of!(ENetHost, bufferCount), 2696);
        assert_eq!(offset_of!(ENetHost, checksum), 2704);
        assert_eq!(offset_of!(ENetHost, compressor), 2712);
        assert_eq!(offset_of!(ENetHost, packetData), 2744);
        assert_eq!(offset_of!(ENetHost, receivedAddress), 10936);
        assert_eq!(offset_of!(ENetHost, receivedData), 10944);
        assert_eq!(offset_of!(ENetHost, receivedDataLength), 10952);
        assert_eq!(offset_of!(ENetHost, totalSentData), 10960);
        assert_eq!(offset_of!(ENetHost, totalSentPackets), 10964);
        assert_eq!(offset_of!(ENetHost, totalReceivedData), 10968);
        assert_eq!(offset_of!(ENetHost, totalReceivedPackets), 10972);
        assert_eq!(offset_of!(ENetHost, intercept), 10976);
        assert_eq!(offset_of!(ENetHost, connectedPeers), 10984);
        assert_eq!(offset_of!(ENetHost, bandwidthLimitedPeers), 10992);
        assert_eq!(offset_of!(ENetHost, duplicatePeers), 11000);
        assert_eq!(offset_of!(ENetHost, maximumPacketSize), 11008);
        assert_eq!(offset_of!(ENetHost, maximumWaitingData), 11016);
        assert_eq!(size_of::<ENetHost>(), 11024);
    }

    // Write a known value through a declared field, read it back through raw
    // offset arithmetic (and the other way around). Covers every scalar
    // width the records use: u16, u32, i32, pointer-sized, pointers.
    #[test]
    fn scalar_round_trip_event() {
        let mut ev = ENetEvent::zeroed();
        ev.type_ = ENET_EVENT_TYPE_RECEIVE;
        ev.channelID = 7;
        ev.data = 0xDEAD_BEEF;
        let fake_packet = 0x1000usize as *mut ENetPacket;
        ev.packet = fake_packet;

        let base = &ev as *const ENetEvent as *const u8;
        unsafe {
            assert_eq!(*(base.add(offset_of!(ENetEvent, type_)) as *const c_int), 3);
            assert_eq!(*base.add(offset_of!(ENetEvent, channelID)), 7);
            assert_eq!(
                *(base.add(offset_of!(ENetEvent, data)) as *const u32),
                0xDEAD_BEEF
            );
            assert_eq!(
                *(base.add(offset_of!(ENetEvent, packet)) as *const *mut ENetPacket),
                fake_packet
            );
        }
    }

    #[test]
    fn scalar_round_trip_host() {
        let mut host: Box<ENetHost> = unsafe { Box::new(mem::zeroed()) };
        let base = host.as_mut() as *mut ENetHost as *mut u8;

        // Raw writes at declared offsets must surface through the fields.
        unsafe {
            *(base.add(offset_of!(ENetHost, peerCount)) as *mut usize) = 1024;
            *(base.add(offset_of!(ENetHost, headerFlags)) as *mut u16) = 0xBEEF;
            *(base.add(offset_of!(ENetHost, randomSeed)) as *mut u32) = 0x5EED_5EED;
            let addr = base.add(offset_of!(ENetHost, address)) as *mut ENetAddress;
            (*addr).port = 17091;
        }
        assert_eq!(host.peerCount, 1024);
        assert_eq!(host.headerFlags, 0xBEEF);
        assert_eq!(host.randomSeed, 0x5EED_5EED);
        assert_eq!(host.address.port, 17091);

        // And a field write must surface at the declared offset.
        host.receivedDataLength = 4096;
        unsafe {
            assert_eq!(
                *(base.add(offset_of!(ENetHost, receivedDataLength)) as *const usize),
                4096
            );
        }
    }

    #[test]
    fn scalar_round_trip_peer() {
        let mut peer: Box<ENetPeer> = unsafe { Box::new(mem::zeroed()) };
        peer.connectID = 0xC0FF_EE00;
        peer.outgoingPeerID = 42;
        peer.address = ENetAddress {
            host: 0x0100_007F,
            port: 17091,
        };
        let base = peer.as_ref() as *const ENetPeer as *const u8;
        unsafe {
            assert_eq!(
                *(base.add(offset_of!(ENetPeer, connectID)) as *const u32),
                0xC0FF_EE00
            );
            assert_eq!(
                *(base.add(offset_of!(ENetPeer, outgoingPeerID)) as *const u16),
                42
            );
            let addr = base.add(offset_of!(ENetPeer, address)) as *const ENetAddress;
            assert_eq!((*addr).port, 17091);
            assert_eq!((*addr).host, 0x0100_007F);
        }
    }

    #[test]
    fn zeroed_event_is_none() {
        let ev = ENetEvent::zeroed();
        assert_eq!(ev.type_, ENET_EVENT_TYPE_NONE);
        assert!(ev.peer.is_null());
        assert!(ev.packet.is_null());
    }
}
