//! Request execution seam.
//!
//! [`HttpClient`](crate::HttpClient) hands a fully described [`HttpRequest`] to
//! a [`Transport`] and gets back a buffered [`HttpResponse`]. The real
//! implementation is [`ReqwestTransport`]; tests substitute their own.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::USER_AGENT;
use reqwest::redirect::Policy;
use tracing::{debug, trace};

use crate::{HttpError, Result};

/// HTTP request verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
}

impl Method {
    /// Upper-case verb name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

/// Everything needed to perform one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Verb.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Headers, attached verbatim.
    pub headers: BTreeMap<String, String>,
    /// Optional body.
    pub body: Option<Bytes>,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Maximum redirects to follow. 0 disables following.
    pub redirect_limit: usize,
    /// `User-Agent` header value.
    pub user_agent: String,
}

/// A fully buffered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Entire response body.
    pub body: Bytes,
}

/// Executes requests synchronously.
pub trait Transport: Send + Sync {
    /// Perform `request`, blocking until the whole body is buffered or the
    /// request fails.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

/// Transport backed by blocking `reqwest` clients.
///
/// One client is built per redirect limit and reused for every later request
/// with that limit. Timeout and user agent are applied per request.
/// Certificate validation is disabled: every endpoint is trusted.
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    clients: Mutex<HashMap<usize, reqwest::blocking::Client>>,
}

impl ReqwestTransport {
    /// Create the transport.
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self, redirect_limit: usize) -> Result<reqwest::blocking::Client> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(&redirect_limit) {
            return Ok(client.clone());
        }

        let policy = if redirect_limit == 0 {
            Policy::none()
        } else {
            Policy::limited(redirect_limit)
        };
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(policy)
            .build()
            .map_err(HttpError::from_send)?;
        debug!("[HTTP] Built client for redirect limit {}", redirect_limit);
        clients.insert(redirect_limit, client.clone());
        Ok(client)
    }

    #[cfg(test)]
    fn cached_clients(&self) -> usize {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let client = self.client(request.redirect_limit)?;

        let mut builder = client
            .request(request.method.into(), request.url.as_str())
            .timeout(request.timeout);
        if !request.headers.keys().any(|name| name.eq_ignore_ascii_case("user-agent")) {
            builder = builder.header(USER_AGENT, request.user_agent.as_str());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(HttpError::from_send)?;
        let status = response.status().as_u16();
        trace!("[HTTP] {} {} -> {}", request.method, response.url(), status);

        let body = response.bytes().map_err(HttpError::from_read)?;
        Ok(HttpResponse { status, body })
    }
}
