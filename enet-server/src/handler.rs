//! Event handler: log connection traffic and echo received payloads back to
//! the sender on the channel they arrived on.

use enet_core::{EventHandler, Packet, PacketFlags, Peer};

pub struct EchoHandler;

impl EventHandler for EchoHandler {
    fn on_connect(&mut self, peer: &Peer<'_>, data: u32) {
        tracing::info!(
            address = %peer.address(),
            connect_id = peer.connect_id(),
            data,
            "peer connected"
        );
    }

    fn on_disconnect(&mut self, peer: &Peer<'_>, data: u32) {
        tracing::info!(address = %peer.address(), data, "peer disconnected");
    }

    fn on_receive(&mut self, peer: &Peer<'_>, channel_id: u8, packet: &Packet) {
        tracing::info!(
            address = %peer.address(),
            channel_id,
            len = packet.len(),
            "packet received"
        );
        let echo = Packet::new(&packet.data(), PacketFlags::RELIABLE);
        if !peer.send(channel_id, &echo) {
            tracing::warn!(address = %peer.address(), channel_id, "echo send refused");
        }
    }
}
