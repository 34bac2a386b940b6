// Configuration module entry point
// Layers built-in defaults, DISCOVERY_* environment variables and CLI overrides

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

use crate::cli::Cli;
use crate::discovery::Scanner;

/// Prefix for environment overrides, e.g. `DISCOVERY_SERVER__HOST`
pub const ENV_PREFIX: &str = "DISCOVERY";

impl Config {
    /// Load configuration with CLI arguments taking precedence
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("server.host", cli.host.clone())?
            .set_override_option("discovery.root_dir", cli.root.clone())?
            .set_override_option("discovery.marker_file", cli.marker.clone())?
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only
    #[cfg(test)]
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("discovery.root_dir", ".")?
            .set_default("discovery.marker_file", "service.marker")?
            .set_default("discovery.default_port", 5000)?
            .set_default("discovery.root_label", "public_html/go_web/*")?
            .set_default("discovery.advertise_host", "localhost")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .set_default("http.server_name", "discovery-server")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.trim_start_matches('[').trim_end_matches(']');
        let ip = host
            .parse::<std::net::IpAddr>()
            .map_err(|e| format!("Invalid address '{}': {e}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Build the project scanner described by the discovery section
    pub fn scanner(&self) -> Scanner {
        Scanner::new(
            &self.discovery.root_dir,
            self.discovery.marker_file.clone(),
            self.discovery.default_port,
        )
    }
}
