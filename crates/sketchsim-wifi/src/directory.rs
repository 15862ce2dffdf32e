//! Fixed catalog of simulated wireless networks.
//!
//! The directory is built once (from configuration or the built-in defaults)
//! and never mutated afterwards. Lookups are exact, case-sensitive name matches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, WifiError};

// ============================================================================
// Encryption
// ============================================================================

/// Authentication mode advertised by a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionType {
    /// No authentication; any secret is accepted.
    Open,
    /// Legacy WEP.
    Wep,
    /// WPA personal.
    WpaPsk,
    /// WPA2 personal.
    Wpa2Psk,
    /// Mixed WPA/WPA2 personal.
    WpaWpa2Psk,
    /// WPA2 enterprise.
    Wpa2Enterprise,
    /// WPA3 personal.
    Wpa3Psk,
    /// Mixed WPA2/WPA3 personal.
    Wpa2Wpa3Psk,
    /// WAPI personal.
    WapiPsk,
}

impl EncryptionType {
    /// Numeric auth mode as reported to firmware.
    pub const fn code(&self) -> u8 {
        match self {
            EncryptionType::Open => 0,
            EncryptionType::Wep => 1,
            EncryptionType::WpaPsk => 2,
            EncryptionType::Wpa2Psk => 3,
            EncryptionType::WpaWpa2Psk => 4,
            EncryptionType::Wpa2Enterprise => 5,
            EncryptionType::Wpa3Psk => 6,
            EncryptionType::Wpa2Wpa3Psk => 7,
            EncryptionType::WapiPsk => 8,
        }
    }

    /// Whether a connect attempt must present the network's secret.
    pub const fn requires_secret(&self) -> bool {
        !matches!(self, EncryptionType::Open)
    }
}

impl fmt::Display for EncryptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncryptionType::Open => "Open",
            EncryptionType::Wep => "WEP",
            EncryptionType::WpaPsk => "WPA-PSK",
            EncryptionType::Wpa2Psk => "WPA2-PSK",
            EncryptionType::WpaWpa2Psk => "WPA/WPA2-PSK",
            EncryptionType::Wpa2Enterprise => "WPA2-Enterprise",
            EncryptionType::Wpa3Psk => "WPA3-PSK",
            EncryptionType::Wpa2Wpa3Psk => "WPA2/WPA3-PSK",
            EncryptionType::WapiPsk => "WAPI-PSK",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Network Record
// ============================================================================

/// One simulated network.
///
/// When `encryption` is omitted from configuration it is inferred from the
/// secret: empty means [`EncryptionType::Open`], anything else WPA2-PSK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NetworkEntry")]
pub struct NetworkRecord {
    /// Network name (SSID). Unique within a directory.
    pub name: String,
    /// Shared secret. Ignored for open networks.
    pub secret: String,
    /// Base signal strength in dBm.
    pub rssi: i32,
    /// Radio channel.
    pub channel: u8,
    /// Authentication mode.
    pub encryption: EncryptionType,
}

impl NetworkRecord {
    /// Create a secured (WPA2-PSK) network.
    pub fn secured(name: impl Into<String>, secret: impl Into<String>, rssi: i32, channel: u8) -> Self {
        NetworkRecord {
            name: name.into(),
            secret: secret.into(),
            rssi,
            channel,
            encryption: EncryptionType::Wpa2Psk,
        }
    }

    /// Create an open network.
    pub fn open(name: impl Into<String>, rssi: i32, channel: u8) -> Self {
        NetworkRecord {
            name: name.into(),
            secret: String::new(),
            rssi,
            channel,
            encryption: EncryptionType::Open,
        }
    }

    /// Override the authentication mode.
    pub fn with_encryption(mut self, encryption: EncryptionType) -> Self {
        self.encryption = encryption;
        self
    }
}

/// Configuration-file shape of a record.
#[derive(Deserialize)]
struct NetworkEntry {
    name: String,
    #[serde(default)]
    secret: String,
    rssi: i32,
    #[serde(default = "default_channel")]
    channel: u8,
    #[serde(default)]
    encryption: Option<EncryptionType>,
}

fn default_channel() -> u8 {
    1
}

impl From<NetworkEntry> for NetworkRecord {
    fn from(entry: NetworkEntry) -> Self {
        let encryption = entry.encryption.unwrap_or(if entry.secret.is_empty() {
            EncryptionType::Open
        } else {
            EncryptionType::Wpa2Psk
        });
        NetworkRecord {
            name: entry.name,
            secret: entry.secret,
            rssi: entry.rssi,
            channel: entry.channel,
            encryption,
        }
    }
}

// ============================================================================
// Directory
// ============================================================================

/// Read-only, insertion-ordered catalog of networks.
#[derive(Debug, Clone)]
pub struct NetworkDirectory {
    records: Vec<NetworkRecord>,
}

impl NetworkDirectory {
    /// Build a directory, rejecting duplicate names and secured networks
    /// without a secret.
    pub fn new(records: Vec<NetworkRecord>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|r| r.name == record.name) {
                return Err(WifiError::DuplicateNetwork(record.name.clone()));
            }
            if record.encryption.requires_secret() && record.secret.is_empty() {
                return Err(WifiError::MissingSecret {
                    name: record.name.clone(),
                    encryption: record.encryption,
                });
            }
        }
        Ok(NetworkDirectory { records })
    }

    /// The networks every session sees when none are configured.
    pub fn builtin() -> Self {
        NetworkDirectory {
            records: vec![
                NetworkRecord::secured("APx", "Password.Password", -35, 36),
                NetworkRecord::secured("OfficeWiFi", "Office2024!", -55, 6),
                NetworkRecord::open("FreePublicWiFi", -72, 11),
            ],
        }
    }

    /// Find a network by exact name.
    pub fn lookup(&self, name: &str) -> Option<&NetworkRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Position of a network by exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    /// All networks in insertion order.
    pub fn list(&self) -> &[NetworkRecord] {
        &self.records
    }

    /// Network at a scan index.
    pub fn get(&self, index: usize) -> Option<&NetworkRecord> {
        self.records.get(index)
    }

    /// Number of networks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no networks.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for NetworkDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
