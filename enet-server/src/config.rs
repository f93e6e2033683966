//! Load daemon config from file and environment.

use serde::Deserialize;
use std::path::PathBuf;

/// Daemon configuration. File: ~/.config/enetd/config.toml or
/// /etc/enetd/config.toml. Env overrides: ENETD_BIND_HOST, ENETD_PORT,
/// ENETD_MAX_PEERS, ENETD_CHANNEL_LIMIT, ENETD_SERVICE_TIMEOUT_MS,
/// ENETD_LIBRARY_PATH.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Local bind address (default any interface).
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    /// UDP listen port (default 17091).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connected peer capacity (default 1024).
    #[serde(default = "default_max_peers")]
    pub max_peers: usize,
    /// Channels per connection (default 10).
    #[serde(default = "default_channel_limit")]
    pub channel_limit: usize,
    /// Inbound bandwidth cap in bytes/s; 0 = unlimited.
    #[serde(default)]
    pub incoming_bandwidth: u32,
    /// Outbound bandwidth cap in bytes/s; 0 = unlimited.
    #[serde(default)]
    pub outgoing_bandwidth: u32,
    /// Service poll timeout in milliseconds (default 1000).
    #[serde(default = "default_service_timeout_ms")]
    pub service_timeout_ms: u32,
    /// Engine library candidates, tried in order.
    #[serde(default = "default_library_paths")]
    pub library_paths: Vec<String>,
    /// Checksum callback selected by name.
    #[serde(default = "default_checksum")]
    pub checksum: String,
    /// Compression callback selected by name.
    #[serde(default = "default_compression")]
    pub compression: String,
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    17091
}
fn default_max_peers() -> usize {
    1024
}
fn default_channel_limit() -> usize {
    10
}
fn default_service_timeout_ms() -> u32 {
    enet_core::DEFAULT_SERVICE_TIMEOUT_MS
}
fn default_library_paths() -> Vec<String> {
    vec![
        "libenet.so".to_string(),
        "/usr/local/lib/libenet.dylib".to_string(),
    ]
}
fn default_checksum() -> String {
    "crc32".to_string()
}
fn default_compression() -> String {
    "range_coder".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            max_peers: default_max_peers(),
            channel_limit: default_channel_limit(),
            incoming_bandwidth: 0,
            outgoing_bandwidth: 0,
            service_timeout_ms: default_service_timeout_ms(),
            library_paths: default_library_paths(),
            checksum: default_checksum(),
            compression: default_compression(),
        }
    }
}

/// Load config: merge default, then config file (if present), then env vars.
pub fn load() -> Config {
    let mut c = load_file().unwrap_or_default();
    if let Ok(s) = std::env::var("ENETD_BIND_HOST") {
        c.bind_host = s;
    }
    env_parse("ENETD_PORT", &mut c.port);
    env_parse("ENETD_MAX_PEERS", &mut c.max_peers);
    env_parse("ENETD_CHANNEL_LIMIT", &mut c.channel_limit);
    env_parse("ENETD_SERVICE_TIMEOUT_MS", &mut c.service_timeout_ms);
    if let Ok(s) = std::env::var("ENETD_LIBRARY_PATH") {
        c.library_paths = vec![s];
    }
    c
}

fn env_parse<T: std::str::FromStr>(var: &str, slot: &mut T) {
    if let Ok(s) = std::env::var(var) {
        if let Ok(v) = s.parse::<T>() {
            *slot = v;
        }
    }
}

fn config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut out = Vec::new();
    if let Some(h) = home {
        out.push(h.join(".config/enetd/config.toml"));
    }
    out.push(PathBuf::from("/etc/enetd/config.toml"));
    out
}

fn load_file() -> Option<Config> {
    for p in config_paths() {
        if p.exists() {
            if let Ok(s) = std::fs::read_to_string(&p) {
                if let Ok(c) = toml::from_str::<Config>(&s) {
                    return Some(c);
                }
            }
            break;
        }
    }
    None
}
