//! Typed view over one protocol command cell. The engine batches commands
//! into the host record's union array; a cell only tells you which arm is
//! live through the command number in its header byte, so decoding picks the
//! one requested arm on demand instead of materializing all of them.

use crate::abi::{
    ENetProtocol, ENetProtocolAcknowledge, ENetProtocolBandwidthLimit, ENetProtocolCommandHeader,
    ENetProtocolConnect, ENetProtocolDisconnect, ENetProtocolSendFragment,
    ENetProtocolSendReliable, ENetProtocolSendUnreliable, ENetProtocolSendUnsequenced,
    ENetProtocolThrottleConfigure, ENetProtocolVerifyConnect, ENET_PROTOCOL_COMMAND_ACKNOWLEDGE,
    ENET_PROTOCOL_COMMAND_BANDWIDTH_LIMIT, ENET_PROTOCOL_COMMAND_CONNECT,
    ENET_PROTOCOL_COMMAND_DISCONNECT, ENET_PROTOCOL_COMMAND_MASK, ENET_PROTOCOL_COMMAND_PING,
    ENET_PROTOCOL_COMMAND_SEND_FRAGMENT, ENET_PROTOCOL_COMMAND_SEND_RELIABLE,
    ENET_PROTOCOL_COMMAND_SEND_UNRELIABLE, ENET_PROTOCOL_COMMAND_SEND_UNRELIABLE_FRAGMENT,
    ENET_PROTOCOL_COMMAND_SEND_UNSEQUENCED, ENET_PROTOCOL_COMMAND_THROTTLE_CONFIGURE,
    ENET_PROTOCOL_COMMAND_VERIFY_CONNECT,
};

/// One decoded command arm. Fragment commands share a wire layout whether
/// the fragments are reliable or not, so both command numbers map to the
/// fragment arm with a flag telling them apart.
#[derive(Debug, Clone, Copy)]
pub enum Command {
    Acknowledge(ENetProtocolAcknowledge),
    Connect(ENetProtocolConnect),
    VerifyConnect(ENetProtocolVerifyConnect),
    Disconnect(ENetProtocolDisconnect),
    Ping(ENetProtocolCommandHeader),
    SendReliable(ENetProtocolSendReliable),
    SendUnreliable(ENetProtocolSendUnreliable),
    SendUnsequenced(ENetProtocolSendUnsequenced),
    SendFragment {
        fragment: ENetProtocolSendFragment,
        reliable: bool,
    },
    BandwidthLimit(ENetProtocolBandwidthLimit),
    ThrottleConfigure(ENetProtocolThrottleConfigure),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandDecodeError {
    #[error("unknown protocol command number {0}")]
    UnknownCommand(u8),
}

/// Decode one command cell by its discriminant byte. The flag bits in the
/// command byte are masked off before dispatch; an unrecognized number is an
/// error, never a guessed arm.
pub fn decode_command(cell: &ENetProtocol) -> Result<Command, CommandDecodeError> {
    // The header arm is valid for every live cell; only the number decides
    // which wider arm may be read.
    let command = unsafe { cell.header }.command & ENET_PROTOCOL_COMMAND_MASK;
    let decoded = unsafe {
        match command {
            ENET_PROTOCOL_COMMAND_ACKNOWLEDGE => Command::Acknowledge(cell.acknowledge),
            ENET_PROTOCOL_COMMAND_CONNECT => Command::Connect(cell.connect),
            ENET_PROTOCOL_COMMAND_VERIFY_CONNECT => Command::VerifyConnect(cell.verifyConnect),
            ENET_PROTOCOL_COMMAND_DISCONNECT => Command::Disconnect(cell.disconnect),
            ENET_PROTOCOL_COMMAND_PING => Command::Ping(cell.header),
            ENET_PROTOCOL_COMMAND_SEND_RELIABLE => Command::SendReliable(cell.sendReliable),
            ENET_PROTOCOL_COMMAND_SEND_UNRELIABLE => Command::SendUnreliable(cell.sendUnreliable),
            ENET_PROTOCOL_COMMAND_SEND_UNSEQUENCED => {
                Command::SendUnsequenced(cell.sendUnsequenced)
            }
            ENET_PROTOCOL_COMMAND_SEND_FRAGMENT => Command::SendFragment {
                fragment: cell.sendFragment,
                reliable: true,
            },
            ENET_PROTOCOL_COMMAND_SEND_UNRELIABLE_FRAGMENT => Command::SendFragment {
                fragment: cell.sendFragment,
                reliable: false,
            },
            ENET_PROTOCOL_COMMAND_BANDWIDTH_LIMIT => Command::BandwidthLimit(cell.bandwidthLimit),
            ENET_PROTOCOL_COMMAND_THROTTLE_CONFIGURE => {
                Command::ThrottleConfigure(cell.throttleConfigure)
            }
            other => return Err(CommandDecodeError::UnknownCommand(other)),
        }
    };
    Ok(decoded)
}
