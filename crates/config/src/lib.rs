//! hookd Configuration
//!
//! TOML-based configuration loading with sensible defaults. Components are
//! declared once under a name, then referenced by name from webhook
//! bindings - the same component configuration is never repeated.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use hookd_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[receivers]\nhook = \"insecure://\"").unwrap();
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [daemon]
//! host = "127.0.0.1"
//! port = 8080
//! allow_debug = false
//!
//! [receivers]
//! github = "github://?secret=s33kret"
//!
//! [transformations]
//! passthrough = "null://"
//!
//! [dispatchers]
//! console = "log://"
//!
//! [[webhooks]]
//! endpoint = "/github-test"
//! receiver = "github"
//! transformations = ["passthrough"]
//! dispatchers = ["console"]
//! ```

mod daemon;
mod error;
mod logging;
mod webhooks;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use daemon::DaemonConfig;
pub use error::{ConfigError, Result};
pub use logging::LogConfig;
pub use webhooks::WebhookBinding;

/// Main configuration structure
///
/// All sections are optional with sensible defaults; a config with no
/// webhooks parses fine and fails later, at pipeline-table construction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Daemon settings (bind address, debug echo)
    pub daemon: DaemonConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Named receiver descriptors
    pub receivers: HashMap<String, String>,

    /// Named transformation descriptors
    pub transformations: HashMap<String, String>,

    /// Named dispatcher descriptors
    pub dispatchers: HashMap<String, String>,

    /// Webhook bindings (endpoint → named components)
    pub webhooks: Vec<WebhookBinding>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Look up a named receiver descriptor
    pub fn receiver_descriptor(&self, name: &str) -> Option<&str> {
        self.receivers.get(name).map(String::as_str)
    }

    /// Look up a named transformation descriptor
    pub fn transformation_descriptor(&self, name: &str) -> Option<&str> {
        self.transformations.get(name).map(String::as_str)
    }

    /// Look up a named dispatcher descriptor
    pub fn dispatcher_descriptor(&self, name: &str) -> Option<&str> {
        self.dispatchers.get(name).map(String::as_str)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::Parse)?;
        Ok(config)
    }
}
