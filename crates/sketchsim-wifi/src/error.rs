//! Error types for the radio crate.

use thiserror::Error;

use crate::EncryptionType;

/// Errors raised while building a network directory.
///
/// Connect attempts never produce these; they report through
/// [`crate::RadioStatus`] instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WifiError {
    /// Two records share the same network name.
    #[error("Duplicate network name '{0}' in directory")]
    DuplicateNetwork(String),

    /// A secured network was declared without a secret.
    #[error("Network '{name}' uses {encryption} but has no secret")]
    MissingSecret {
        /// Network name.
        name: String,
        /// Declared encryption kind.
        encryption: EncryptionType,
    },
}
