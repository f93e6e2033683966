//! Safe binding layer over the ENet reliable-UDP engine.
//! The engine owns the wire protocol, reliability and congestion machinery;
//! this crate owns the boundary: exact record layouts, the typed call
//! surface, and the lifetime discipline for everything that crosses it.

pub mod abi;
pub mod address;
pub mod event;
pub mod host;
pub mod packet;
pub mod peer;
pub mod protocol;
pub mod sys;

pub use address::{Address, HOST_ANY};
pub use event::{classify, Event, EventDecodeError};
pub use host::{EventHandler, Host, HostError, ServiceError, DEFAULT_SERVICE_TIMEOUT_MS};
pub use packet::{Packet, PacketFlags};
pub use peer::Peer;
pub use protocol::{decode_command, Command, CommandDecodeError};
pub use sys::{Engine, EngineLoadError, InitError, InitGuard};
