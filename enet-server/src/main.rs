// ENet server daemon: load the engine, bind a host, service events until
// signalled to stop.

mod config;
mod handler;

use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use enet_core::{Address, Engine, Host};
use tracing_subscriber::EnvFilter;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_signal(_sig: libc::c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

fn install_signal_handlers() {
    unsafe {
        libc::signal(libc::SIGINT, handle_signal as libc::sighandler_t);
        libc::signal(libc::SIGTERM, handle_signal as libc::sighandler_t);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = config::load();
    let bind_ip: Ipv4Addr = cfg
        .bind_host
        .parse()
        .with_context(|| format!("invalid bind host {:?}", cfg.bind_host))?;
    let address = Address::from(SocketAddrV4::new(bind_ip, cfg.port));

    let engine =
        Arc::new(Engine::load_first(&cfg.library_paths).context("loading engine library")?);

    install_signal_handlers();

    let mut host = Host::create(
        &engine,
        address,
        cfg.max_peers,
        cfg.channel_limit,
        cfg.incoming_bandwidth,
        cfg.outgoing_bandwidth,
    )
    .context("creating host")?;
    host.set_checksum(&cfg.checksum)?;
    host.set_compression(&cfg.compression)?;

    tracing::info!(address = %host.address(), max_peers = cfg.max_peers, "serving");
    let mut echo = handler::EchoHandler;
    let result = host.listen_with(&mut echo, cfg.service_timeout_ms, &SHUTDOWN);
    // Destroy on every exit path, fatal or signalled, before reporting.
    host.close();
    result.context("service loop failed")?;
    tracing::info!("shutdown complete");
    Ok(())
}
