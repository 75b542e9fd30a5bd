//! Daemon configuration section

use serde::Deserialize;

/// Daemon settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Whether requests may opt into debug echo with a `debug` query
    /// parameter
    pub allow_debug: bool,

    /// Maximum accepted request body size in bytes
    pub max_payload_size: usize,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allow_debug: false,
            max_payload_size: 16 * 1024 * 1024,
        }
    }
}

impl DaemonConfig {
    /// The address to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
