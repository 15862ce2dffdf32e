//! Simulation configuration loaded from YAML.
//!
//! Every section is optional; omitted fields take the defaults of the
//! corresponding component. A minimal file can be empty.
//!
//! ```yaml
//! networks:
//!   - name: Net1
//!     secret: pw123
//!     rssi: -40
//!     channel: 6
//! radio:
//!   rng_seed: 42
//! http:
//!   timeout_ms: 2000
//! sketch:
//!   ssid: Net1
//!   password: pw123
//!   url: http://example.test/data
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use sketchsim_http::HttpConfig;
use sketchsim_wifi::{NetworkDirectory, NetworkRecord, RadioConfig, WifiError};
use thiserror::Error;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid YAML for this schema.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The network list is inconsistent.
    #[error("Network directory error: {0}")]
    Directory(#[from] WifiError),
}

/// Settings for the bundled demo sketch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Network to join.
    pub ssid: String,
    /// Secret for the network.
    pub password: String,
    /// URL fetched on every loop.
    pub url: String,
    /// Pause between loop iterations in milliseconds.
    pub interval_ms: u64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            ssid: "APx".to_string(),
            password: "Password.Password".to_string(),
            url: "http://example.com/".to_string(),
            interval_ms: 10_000,
        }
    }
}

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated networks. The built-in directory when absent.
    pub networks: Option<Vec<NetworkRecord>>,
    /// Radio timing, addressing and identity.
    pub radio: RadioConfig,
    /// HTTP client defaults.
    pub http: HttpConfig,
    /// Demo sketch settings.
    pub sketch: SketchConfig,
}

impl SimConfig {
    /// Build the validated network directory for this configuration.
    pub fn directory(&self) -> Result<NetworkDirectory, ConfigError> {
        match &self.networks {
            Some(records) => Ok(NetworkDirectory::new(records.clone())?),
            None => Ok(NetworkDirectory::builtin()),
        }
    }
}

/// Parse a configuration from a YAML string and validate its network list.
pub fn load_config_from_str(yaml: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = if yaml.trim().is_empty() {
        SimConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    config.directory()?;
    Ok(config)
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<SimConfig, ConfigError> {
    let yaml = std::fs::read_to_string(path)?;
    load_config_from_str(&yaml)
}
