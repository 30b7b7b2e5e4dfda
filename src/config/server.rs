//! Receiver process configuration.

use std::env;

/// Default cap on buffered webhook bodies (matches actix's payload default).
pub const DEFAULT_MAX_BODY_BYTES: usize = 262_144;

/// Configuration for the receiver binary
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let max_body_bytes = env::var("WEBHOOK_MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Self {
            bind_address,
            max_body_bytes,
        }
    }
}
