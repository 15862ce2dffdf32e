//! # sketchsim-wifi
//!
//! Simulated wireless radio for the sketchsim firmware harness.
//!
//! - [`NetworkDirectory`]: the fixed, read-only catalog of networks a session can see.
//! - [`RadioSession`]: the connection state machine firmware drives through
//!   connect, disconnect, reconnect, scan and status queries.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use sketchsim_common::ManualClock;
//! use sketchsim_wifi::{NetworkDirectory, NetworkRecord, RadioConfig, RadioSession, RadioStatus};
//!
//! let directory = NetworkDirectory::new(vec![NetworkRecord::secured("Net1", "pw123", -40, 6)])?;
//! let mut radio = RadioSession::new(
//!     Arc::new(directory),
//!     Arc::new(ManualClock::new()),
//!     RadioConfig { rng_seed: Some(1), ..RadioConfig::default() },
//! );
//!
//! assert_eq!(radio.connect("Net1", Some("nope")), RadioStatus::ConnectFailed);
//! assert_eq!(radio.connect("Net1", Some("pw123")), RadioStatus::Connected);
//! assert!((-42..=-38).contains(&radio.rssi()));
//! # Ok::<(), sketchsim_wifi::WifiError>(())
//! ```

mod directory;
mod error;
mod session;

pub use directory::{EncryptionType, NetworkDirectory, NetworkRecord};
pub use error::WifiError;
pub use session::{MacAddress, RadioConfig, RadioMode, RadioSession, RadioStatus};

/// Result type for radio setup.
pub type Result<T> = std::result::Result<T, WifiError>;
