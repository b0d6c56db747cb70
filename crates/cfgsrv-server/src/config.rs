//! Process configuration.
//!
//! Every setting can come from a flag or an environment variable. The
//! database path has no default: starting without a store is fatal.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

/// cfgsrv language/compare configuration registry.
#[derive(Debug, Clone, Parser)]
#[command(name = "cfgsrv", version, about = "Language and compare configuration registry")]
pub struct ServerConfig {
    /// SQLite database file holding the registry.
    #[arg(long, env = "CFGSRV_DB_PATH")]
    pub db_path: String,

    /// Interface to bind.
    #[arg(long, env = "CFGSRV_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Seconds to let in-flight requests drain before forcing shutdown.
    #[arg(long, env = "CFGSRV_SHUTDOWN_GRACE_SECS", default_value_t = 10)]
    pub shutdown_grace_secs: u64,

    /// Log filter (trace, debug, info, warn, error, or a full directive).
    #[arg(long, env = "CFGSRV_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
