// Application state module
// Immutable per-process state shared by every connection

use std::net::SocketAddr;

use super::types::Config;
use crate::discovery::Scanner;

/// Application state
pub struct AppState {
    pub config: Config,
    pub scanner: Scanner,
    /// Address reported as `main`, e.g. "localhost:5000"
    pub advertised_addr: String,
}

impl AppState {
    /// Create state for a server bound to `local_addr`
    pub fn new(config: &Config, local_addr: SocketAddr) -> Self {
        Self {
            config: config.clone(),
            scanner: config.scanner(),
            advertised_addr: format!(
                "{}:{}",
                config.discovery.advertise_host,
                local_addr.port()
            ),
        }
    }
}
