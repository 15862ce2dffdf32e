//! # sketchsim-http
//!
//! Blocking HTTP bridge for the sketchsim firmware harness.
//!
//! Firmware issues a request through [`HttpClient`], which performs a real
//! network transaction via a [`Transport`], buffers the entire response, and
//! exposes it both as a [`Text`](sketchsim_common::Text) and through a
//! [`ResponseStream`] with socket-like `available`/`read`/`find` semantics.
//!
//! ## Usage
//!
//! ```no_run
//! use sketchsim_http::{HttpClient, HttpError};
//!
//! let mut http = HttpClient::new();
//! http.begin("http://example.test/data");
//! http.add_header("Accept", "application/json");
//!
//! let code = http.get();
//! if code > 0 {
//!     let stream = http.stream_mut();
//!     if stream.find("\"temp\":") {
//!         let value = stream.read_string_until(b',');
//!         println!("temperature {}", value.to_float());
//!     }
//! } else {
//!     println!("request failed: {}", HttpError::describe_code(code));
//! }
//! http.end();
//! ```

mod client;
mod error;
mod stream;
mod transport;

pub use client::{HttpClient, HttpConfig};
pub use error::HttpError;
pub use stream::ResponseStream;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, HttpError>;
