//! # sketchsim-common
//!
//! Common types shared by every layer of the sketchsim firmware harness.
//!
//! - [`Text`]: the growable, value-semantic text buffer used as the string type
//!   across the compatibility layer, with numeric conversion in selectable bases.
//! - [`Clock`]: the time source behind `millis()`/`delay()`. [`SystemClock`] really
//!   sleeps; [`ManualClock`] advances a virtual counter so tests never block.
//!
//! ## Usage
//!
//! ```
//! use sketchsim_common::{Base, Text};
//!
//! let mut line = Text::from("rssi=");
//! line += &Text::from_int(-42, Base::Dec);
//! assert_eq!(line, "rssi=-42");
//! assert_eq!(Text::from_int(255, Base::Hex), "ff");
//! ```

pub mod clock;
mod error;
pub mod text;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TextError;
pub use text::{Base, Text};

/// Result type for text conversions.
pub type Result<T> = std::result::Result<T, TextError>;
