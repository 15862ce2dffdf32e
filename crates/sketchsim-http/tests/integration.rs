//! End-to-end tests of the HTTP bridge against a local mock server.
//!
//! The mock server runs on a tokio runtime; the bridge itself is blocking and
//! is driven from the test thread outside the runtime.

use std::net::TcpListener;
use std::time::Duration;

use sketchsim_http::{HttpClient, HttpError, Method};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Helper Functions
// ============================================================================

fn start_server() -> (Runtime, MockServer) {
    let rt = Runtime::new().expect("tokio runtime");
    let server = rt.block_on(MockServer::start());
    (rt, server)
}

fn mount(rt: &Runtime, server: &MockServer, mock: Mock) {
    rt.block_on(mock.mount(server));
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_get_streams_body() {
    let (rt, server) = start_server();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok")),
    );

    let mut http = HttpClient::new();
    assert!(http.begin(&format!("{}/data", server.uri())));
    assert_eq!(http.get(), 200);
    assert_eq!(http.response_body(), "ok");

    let stream = http.stream_mut();
    assert_eq!(stream.available(), 2);
    assert_eq!(stream.read(), Some(b'o'));
    assert_eq!(stream.read(), Some(b'k'));
    assert_eq!(stream.read(), None);
}

#[test]
fn test_headers_user_agent_and_auth_are_sent() {
    let (rt, server) = start_server();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/secure"))
            .and(header("user-agent", "ESP32-Arduino/1.0"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(header("x-device", "b"))
            .respond_with(ResponseTemplate::new(200).set_body_string("welcome")),
    );

    let mut http = HttpClient::new();
    http.begin(&format!("{}/secure", server.uri()));
    http.add_header("X-Device", "a");
    http.add_header("X-Device", "b");
    http.set_authorization("user", "pass");
    assert_eq!(http.get(), 200);
    assert_eq!(http.response_body(), "welcome");
}

#[test]
fn test_post_sends_body() {
    let (rt, server) = start_server();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/readings"))
            .and(body_string("t=21.5"))
            .respond_with(ResponseTemplate::new(201).set_body_string("stored")),
    );

    let mut http = HttpClient::new();
    http.begin(&format!("{}/readings", server.uri()));
    assert_eq!(http.post("t=21.5"), 201);
    assert_eq!(http.response_size(), 6);

    let received = rt.block_on(server.received_requests()).unwrap_or_default();
    assert_eq!(received.len(), 1);
}

#[test]
fn test_other_verbs() {
    let (rt, server) = start_server();
    for verb in ["PUT", "PATCH", "DELETE", "HEAD"] {
        mount(
            &rt,
            &server,
            Mock::given(method(verb))
                .and(path("/item"))
                .respond_with(ResponseTemplate::new(204)),
        );
    }

    let mut http = HttpClient::new();
    http.begin(&format!("{}/item", server.uri()));
    assert_eq!(http.put("a"), 204);
    assert_eq!(http.patch("b"), 204);
    assert_eq!(http.send_request(Method::Delete, None), 204);
    assert_eq!(http.send_request(Method::Head, None), 204);
    assert_eq!(http.response_size(), 0);
}

#[test]
fn test_error_status_is_not_a_transport_failure() {
    let (rt, server) = start_server();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope")),
    );

    let mut http = HttpClient::new();
    http.begin(&format!("{}/missing", server.uri()));
    assert_eq!(http.get(), 404);
    assert_eq!(http.response_body(), "nope");
    assert!(http.last_error().is_none());
}

#[test]
fn test_redirects_follow_by_default() {
    let (rt, server) = start_server();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new")),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved")),
    );

    let mut http = HttpClient::new();
    http.begin(&format!("{}/old", server.uri()));
    assert_eq!(http.get(), 200);
    assert_eq!(http.response_body(), "moved");

    http.set_follow_redirects(false);
    assert_eq!(http.get(), 302);
}

#[test]
fn test_timeout_reports_read_timeout() {
    let (rt, server) = start_server();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500))),
    );

    let mut http = HttpClient::new();
    http.begin(&format!("{}/slow", server.uri()));
    http.set_timeout(200);
    assert_eq!(http.get(), -11);
    assert_eq!(http.status(), 0);
    assert!(matches!(http.last_error(), Some(HttpError::ReadTimeout(_))));
}

#[test]
fn test_timeout_and_user_agent_apply_per_request() {
    let (rt, server) = start_server();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/slow"))
            .and(header("user-agent", "bench/2"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400))),
    );

    let mut http = HttpClient::new();
    http.begin(&format!("{}/slow", server.uri()));
    http.set_user_agent("bench/2");
    http.set_timeout(100);
    assert_eq!(http.get(), -11);

    // Same client, longer timeout.
    http.set_timeout(5000);
    assert_eq!(http.get(), 200);
}

#[test]
fn test_refused_connection_reports_negative_code() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let mut http = HttpClient::new();
    http.begin(&format!("http://127.0.0.1:{port}/data"));
    let code = http.get();
    assert_eq!(code, -1);
    assert_eq!(HttpError::describe_code(code), "connection refused");
    assert_eq!(http.response_size(), 0);
    assert!(!http.stream().connected());
}

#[test]
fn test_invalid_url_reports_refused() {
    let mut http = HttpClient::new();
    http.begin("not a url");
    assert_eq!(http.get(), -1);
}
