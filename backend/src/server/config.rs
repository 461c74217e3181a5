//! Process configuration loaded once at startup.
//!
//! Everything is environment-driven. A missing or invalid token secret is a
//! fatal condition: no code path that issues or validates tokens may run
//! without one.

use std::net::SocketAddr;

use crate::domain::{SigningSecret, SigningSecretError};

/// Environment variable naming the bind address.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
/// Environment variable naming the PostgreSQL URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable pointing at a file holding the token secret.
pub const TOKEN_SECRET_FILE_VAR: &str = "TOKEN_SECRET_FILE";
/// Environment variable holding the token secret inline.
pub const TOKEN_SECRET_VAR: &str = "TOKEN_SECRET";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Startup configuration failures; all of them abort the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The bind address did not parse.
    #[error("{BIND_ADDR_VAR} is not a valid socket address: {value}")]
    InvalidBindAddr {
        /// The rejected input.
        value: String,
    },
    /// No database URL was supplied.
    #[error("{DATABASE_URL_VAR} must be set")]
    MissingDatabaseUrl,
    /// No token secret was supplied through either variable.
    #[error("set {TOKEN_SECRET_FILE_VAR} or {TOKEN_SECRET_VAR}")]
    MissingTokenSecret,
    /// The secret file could not be read.
    #[error("failed to read {TOKEN_SECRET_FILE_VAR} at {path}: {message}")]
    UnreadableSecretFile {
        /// Configured path.
        path: String,
        /// Underlying I/O failure.
        message: String,
    },
    /// The secret material failed validation.
    #[error(transparent)]
    InvalidSecret(#[from] SigningSecretError),
}

/// Validated server configuration.
pub struct ServerConfig {
    /// Socket address the HTTP server binds.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Validated token signing secret.
    pub secret: SigningSecret,
}

impl ServerConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_addr =
            std::env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: raw_addr })?;

        let database_url =
            std::env::var(DATABASE_URL_VAR).map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let secret = load_secret()?;

        Ok(Self {
            bind_addr,
            database_url,
            secret,
        })
    }
}

fn load_secret() -> Result<SigningSecret, ConfigError> {
    if let Ok(path) = std::env::var(TOKEN_SECRET_FILE_VAR) {
        let bytes = std::fs::read(&path).map_err(|err| ConfigError::UnreadableSecretFile {
            path,
            message: err.to_string(),
        })?;
        return Ok(SigningSecret::new(bytes)?);
    }

    match std::env::var(TOKEN_SECRET_VAR) {
        Ok(value) => Ok(SigningSecret::new(value.into_bytes())?),
        Err(_) => Err(ConfigError::MissingTokenSecret),
    }
}
