//! Firmware-facing HTTP client.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sketchsim_common::Text;
use sketchsim_metrics::{metric_defs, metrics};
use tracing::{debug, info, warn};

use crate::transport::{HttpRequest, Method, ReqwestTransport, Transport};
use crate::{HttpError, ResponseStream};

// ============================================================================
// Configuration Types
// ============================================================================

/// Defaults applied to every new [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Whether redirects are followed.
    pub follow_redirects: bool,
    /// Maximum redirects followed when enabled.
    pub redirect_limit: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout_ms: 5000,
            user_agent: "ESP32-Arduino/1.0".to_string(),
            follow_redirects: true,
            redirect_limit: 10,
        }
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// One reusable HTTP transaction.
///
/// Call [`begin`](Self::begin) with a URL, optionally add headers, then issue
/// a verb. The call blocks until the whole response is buffered and returns
/// the HTTP status, or a negative code from [`HttpError::code`] on transport
/// failure. The body is then available as a [`Text`] and through
/// [`stream_mut`](Self::stream_mut).
pub struct HttpClient<T = ReqwestTransport> {
    transport: T,
    config: HttpConfig,
    url: Option<String>,
    headers: BTreeMap<String, String>,
    status: i32,
    body: Bytes,
    stream: ResponseStream,
    last_error: Option<HttpError>,
}

impl HttpClient<ReqwestTransport> {
    /// Create a client with default settings over the real network.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new(), HttpConfig::default())
    }

    /// Create a client with the given settings over the real network.
    pub fn with_config(config: HttpConfig) -> Self {
        Self::with_transport(ReqwestTransport::new(), config)
    }
}

impl Default for HttpClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> HttpClient<T> {
    /// Text for a status code returned by a request call.
    pub fn error_to_string(code: i32) -> &'static str {
        HttpError::describe_code(code)
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, config: HttpConfig) -> Self {
        HttpClient {
            transport,
            config,
            url: None,
            headers: BTreeMap::new(),
            status: 0,
            body: Bytes::new(),
            stream: ResponseStream::default(),
            last_error: None,
        }
    }

    /// The transport requests go through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Set the target URL. An empty URL is rejected and later requests
    /// report [`HttpError::NotConnected`].
    pub fn begin(&mut self, url: &str) -> bool {
        if url.is_empty() {
            self.url = None;
            return false;
        }
        self.url = Some(url.to_string());
        true
    }

    /// Current target URL.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Add a header. A repeated name replaces the earlier value.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Headers that the next request will carry.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Set the request timeout in milliseconds.
    pub fn set_timeout(&mut self, timeout_ms: u64) {
        self.config.timeout_ms = timeout_ms;
    }

    /// Enable or disable following redirects.
    pub fn set_follow_redirects(&mut self, follow: bool) {
        self.config.follow_redirects = follow;
    }

    /// Set the maximum number of redirects followed.
    pub fn set_redirect_limit(&mut self, limit: usize) {
        self.config.redirect_limit = limit;
    }

    /// Set the `User-Agent` header value.
    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.config.user_agent = user_agent.to_string();
    }

    /// Use HTTP Basic authentication.
    pub fn set_authorization(&mut self, user: &str, password: &str) {
        let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
        self.set_authorization_token(&token);
    }

    /// Use HTTP Basic authentication with pre-encoded credentials.
    pub fn set_authorization_token(&mut self, token: &str) {
        self.add_header("Authorization", &format!("Basic {token}"));
    }

    // ------------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------------

    /// Issue a GET.
    pub fn get(&mut self) -> i32 {
        self.send_request(Method::Get, None)
    }

    /// Issue a POST with `body`.
    pub fn post(&mut self, body: impl AsRef<[u8]>) -> i32 {
        self.send_request(Method::Post, Some(body.as_ref()))
    }

    /// Issue a PUT with `body`.
    pub fn put(&mut self, body: impl AsRef<[u8]>) -> i32 {
        self.send_request(Method::Put, Some(body.as_ref()))
    }

    /// Issue a PATCH with `body`.
    pub fn patch(&mut self, body: impl AsRef<[u8]>) -> i32 {
        self.send_request(Method::Patch, Some(body.as_ref()))
    }

    /// Point the client at `url`, attach `headers` and issue `method`.
    pub fn execute(&mut self, method: Method, url: &str, headers: &[(&str, &str)], body: Option<&[u8]>) -> i32 {
        self.begin(url);
        for (name, value) in headers {
            self.add_header(name, value);
        }
        self.send_request(method, body)
    }

    /// Issue `method` against the current URL.
    ///
    /// The previous response is cleared before anything else happens, so a
    /// failed request leaves an empty body and a stored status of 0.
    pub fn send_request(&mut self, method: Method, body: Option<&[u8]>) -> i32 {
        self.body = Bytes::new();
        self.status = 0;
        self.stream = ResponseStream::default();
        self.last_error = None;

        let labels = [("method", method.as_str().to_string())];
        metrics::counter!(metric_defs::HTTP_REQUESTS.name, &labels).increment(1);

        let Some(url) = self.url.clone() else {
            return self.fail(method, HttpError::NotConnected);
        };
        info!("[HTTP] {} {}", method, url);

        let request = HttpRequest {
            method,
            url,
            headers: self.headers.clone(),
            body: body.map(Bytes::copy_from_slice),
            timeout: Duration::from_millis(self.config.timeout_ms),
            redirect_limit: if self.config.follow_redirects {
                self.config.redirect_limit
            } else {
                0
            },
            user_agent: self.config.user_agent.clone(),
        };

        let started = Instant::now();
        match self.transport.execute(&request) {
            Ok(response) => {
                let elapsed = started.elapsed();
                self.status = i32::from(response.status);
                self.body = response.body;
                self.stream = ResponseStream::new(self.body.clone());
                info!("[HTTP] Response code: {}, Size: {} bytes", self.status, self.body.len());

                metrics::histogram!(metric_defs::HTTP_RESPONSE_BYTES.name, &labels).record(self.body.len() as f64);
                metrics::histogram!(metric_defs::HTTP_LATENCY.name, &labels).record(elapsed.as_secs_f64() * 1000.0);
                self.status
            }
            Err(err) => self.fail(method, err),
        }
    }

    fn fail(&mut self, method: Method, err: HttpError) -> i32 {
        let code = err.code();
        warn!("[HTTP] Request failed: {}", err);
        let labels = [("method", method.as_str().to_string()), ("code", code.to_string())];
        metrics::counter!(metric_defs::HTTP_FAILURES.name, &labels).increment(1);
        self.last_error = Some(err);
        code
    }

    // ------------------------------------------------------------------------
    // Response
    // ------------------------------------------------------------------------

    /// Status of the last completed request. 0 before any request and after a
    /// failed one.
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Response body as text.
    pub fn response_body(&self) -> Text {
        Text::from(&self.body[..])
    }

    /// Response body bytes.
    pub fn response_bytes(&self) -> &Bytes {
        &self.body
    }

    /// Response body length in bytes.
    pub fn response_size(&self) -> usize {
        self.body.len()
    }

    /// Reader over the response body.
    pub fn stream(&self) -> &ResponseStream {
        &self.stream
    }

    /// Mutable reader over the response body.
    pub fn stream_mut(&mut self) -> &mut ResponseStream {
        &mut self.stream
    }

    /// The failure behind the last negative return, if any.
    pub fn last_error(&self) -> Option<&HttpError> {
        self.last_error.as_ref()
    }

    /// Drop the response and headers. The URL is kept. Safe to repeat.
    pub fn end(&mut self) {
        self.body = Bytes::new();
        self.status = 0;
        self.headers.clear();
        self.stream.stop();
        debug!("[HTTP] Transaction ended");
    }
}
