//! Error types for the HTTP bridge.

use thiserror::Error;

/// Transport failures of a single request.
///
/// Firmware never sees these as values; [`HttpError::code`] turns each into
/// the negative status the request call returns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// DNS failure, refused connection or unusable URL.
    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    /// The request body could not be sent.
    #[error("send payload failed: {0}")]
    SendPayloadFailed(String),

    /// No URL was set with `begin`.
    #[error("not connected")]
    NotConnected,

    /// The response stopped arriving part way, or redirects looped.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// The configured timeout elapsed.
    #[error("read timeout: {0}")]
    ReadTimeout(String),
}

impl HttpError {
    /// The negative status code reported to firmware.
    pub const fn code(&self) -> i32 {
        match self {
            HttpError::ConnectionRefused(_) => -1,
            HttpError::SendPayloadFailed(_) => -2,
            HttpError::NotConnected => -3,
            HttpError::ConnectionLost(_) => -5,
            HttpError::ReadTimeout(_) => -11,
        }
    }

    /// Text for a status code returned by a request call.
    pub const fn describe_code(code: i32) -> &'static str {
        match code {
            -1 => "connection refused",
            -2 => "send payload failed",
            -3 => "not connected",
            -4 => "send header failed",
            -5 => "connection lost",
            -6 => "no stream",
            -7 => "no HTTP server",
            -8 => "too less ram",
            -9 => "Transfer-Encoding not supported",
            -10 => "Stream write error",
            -11 => "read Timeout",
            _ => "unknown error",
        }
    }

    /// Classify a failure from sending a request.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        let detail = err.to_string();
        if err.is_timeout() {
            HttpError::ReadTimeout(detail)
        } else if err.is_redirect() {
            HttpError::ConnectionLost(detail)
        } else if err.is_body() {
            HttpError::SendPayloadFailed(detail)
        } else {
            HttpError::ConnectionRefused(detail)
        }
    }

    /// Classify a failure from reading a response body.
    pub(crate) fn from_read(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::ReadTimeout(err.to_string())
        } else {
            HttpError::ConnectionLost(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_negative_and_distinct() {
        let errors = [
            HttpError::ConnectionRefused(String::new()),
            HttpError::SendPayloadFailed(String::new()),
            HttpError::NotConnected,
            HttpError::ConnectionLost(String::new()),
            HttpError::ReadTimeout(String::new()),
        ];
        let codes: Vec<i32> = errors.iter().map(HttpError::code).collect();
        assert_eq!(codes, [-1, -2, -3, -5, -11]);
    }

    #[test]
    fn test_display() {
        let err = HttpError::ConnectionRefused("dns error".into());
        assert_eq!(err.to_string(), "connection refused: dns error");
        assert_eq!(HttpError::NotConnected.to_string(), "not connected");
    }

    #[test]
    fn test_describe_code_matches_variants() {
        assert_eq!(HttpError::describe_code(HttpError::NotConnected.code()), "not connected");
        assert_eq!(HttpError::describe_code(-4), "send header failed");
        assert_eq!(HttpError::describe_code(0), "unknown error");
        assert_eq!(HttpError::describe_code(404), "unknown error");
    }
}
