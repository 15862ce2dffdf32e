//! Error types for the common crate.

use thiserror::Error;

/// Errors that can occur when converting to or from [`crate::Text`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    /// Requested a numeric base other than 2, 8, 10 or 16.
    #[error("Unsupported numeric base {0} (must be 2, 8, 10 or 16)")]
    InvalidBase(u32),
}
