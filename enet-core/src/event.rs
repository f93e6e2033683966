//! Event classification: decode one raw poll record into the closed set of
//! typed events. The raw record is engine-owned scratch that gets rewritten
//! on the next poll, so everything a typed event carries is either a value
//! (payload bytes are copied out eagerly) or a borrow that cannot outlive
//! the poll scope (the peer view).

use std::slice;

use crate::abi::{
    ENetEvent, ENET_EVENT_TYPE_CONNECT, ENET_EVENT_TYPE_DISCONNECT, ENET_EVENT_TYPE_NONE,
    ENET_EVENT_TYPE_RECEIVE,
};
use crate::packet::{Packet, PacketFlags};
use crate::peer::Peer;
use crate::sys::EngineApi;

/// One serviced occurrence. `None` is a successful poll that carried no
/// event; the other three variants match the engine's tag values 1–3.
#[derive(Debug)]
pub enum Event<'a> {
    None,
    Connect {
        peer: Peer<'a>,
        /// User data supplied by the connecting side.
        data: u32,
    },
    Disconnect {
        peer: Peer<'a>,
        data: u32,
    },
    Receive {
        peer: Peer<'a>,
        channel_id: u8,
        packet: Packet,
    },
}

/// A record that cannot be decoded. Either the ABI mirror is wrong or the
/// engine broke its contract; both are unrecoverable for the host, so the
/// caller must abort event processing rather than guess.
#[derive(Debug, thiserror::Error)]
pub enum EventDecodeError {
    #[error("unknown event type tag {0}")]
    UnknownType(i32),
    #[error("event carried a null peer pointer")]
    NullPeer,
    #[error("receive event carried a null packet pointer")]
    NullPacket,
}

/// Decode a raw event record.
///
/// # Safety
///
/// `raw` must have been filled by a successful poll of a live host, and the
/// pointers inside it must still be valid (i.e. no poll has happened since).
/// The receive payload is copied out before this returns; the returned
/// event's peer view borrows for `'a` and must not escape the poll scope.
pub unsafe fn classify<'a>(
    raw: &ENetEvent,
    api: &'a EngineApi,
) -> Result<Event<'a>, EventDecodeError> {
    match raw.type_ {
        ENET_EVENT_TYPE_NONE => Ok(Event::None),
        ENET_EVENT_TYPE_CONNECT => {
            let peer = Peer::from_raw(raw.peer, api).ok_or(EventDecodeError::NullPeer)?;
            Ok(Event::Connect {
                peer,
                data: raw.data,
            })
        }
        ENET_EVENT_TYPE_DISCONNECT => {
            let peer = Peer::from_raw(raw.peer, api).ok_or(EventDecodeError::NullPeer)?;
            Ok(Event::Disconnect {
                peer,
                data: raw.data,
            })
        }
        ENET_EVENT_TYPE_RECEIVE => {
            let peer = Peer::from_raw(raw.peer, api).ok_or(EventDecodeError::NullPeer)?;
            let packet = copy_packet(raw)?;
            Ok(Event::Receive {
                peer,
                channel_id: raw.channelID,
                packet,
            })
        }
        other => Err(EventDecodeError::UnknownType(other)),
    }
}

/// Copy the payload out of the native packet record. Length-prefixed, not
/// null-terminated: exactly `dataLength` bytes from `data`.
unsafe fn copy_packet(raw: &ENetEvent) -> Result<Packet, EventDecodeError> {
    if raw.packet.is_null() {
        return Err(EventDecodeError::NullPacket);
    }
    let record = &*raw.packet;
    let flags = PacketFlags::from_bits_truncate(record.flags);
    if record.dataLength == 0 {
        return Ok(Packet::from_owned(Vec::new(), flags));
    }
    if record.data.is_null() {
        return Err(EventDecodeError::NullPacket);
    }
    let bytes = slice::from_raw_parts(record.data, record.dataLength).to_vec();
    Ok(Packet::from_owned(bytes, flags))
}
