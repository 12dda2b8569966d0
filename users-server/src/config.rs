use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/users_api";

/// Request log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per request: method, path, status, latency.
    Concise,
    /// Adds headers and request start events.
    Verbose,
}

/// Process configuration. Every option can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "users-server", about = "HTTP API for creating users", version)]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, hide_env_values = true)]
    pub database_url: String,

    /// Request log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Concise)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Loads `env_file` (or `.env` from the working directory or a parent
    /// when `None`) into the process environment, then parses `args`.
    ///
    /// Variables already set in the environment win over the file, and flags
    /// win over both. A missing file is not an error.
    pub fn load<I, T>(args: I, env_file: Option<&Path>) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Some(path) = env_file {
            dotenvy::from_path(path).ok();
        } else {
            dotenvy::dotenv().ok();
        }

        Self::try_parse_from(args)
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
