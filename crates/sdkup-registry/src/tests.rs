use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

use sdkup_core::SetupError;

use super::*;

const SAMPLE_INDEX: &str = r#"{
  "releases-index": [
    { "channel-version": "9.0", "latest-release": "9.0.0", "support-phase": "active" },
    { "channel-version": "8.0", "latest-release": "8.0.10", "support-phase": "active" },
    { "channel-version": "7.0", "latest-release": "7.0.20", "support-phase": "eol" },
    { "channel-version": "1.0", "latest-release": "1.0.16", "support-phase": "eol" }
  ]
}"#;

#[test]
fn release_index_matches_leading_component_textually() {
    let index = ReleaseIndex::from_json_str(SAMPLE_INDEX).expect("index must parse");
    assert_eq!(index.channel_for_major("8"), Some("8.0"));
    assert_eq!(index.channel_for_major("1"), Some("1.0"));
    assert_eq!(index.channel_for_major("10"), None);
    assert_eq!(index.channel_for_major("08"), None);
}

#[test]
fn release_index_preserves_full_channel_string() {
    let index = ReleaseIndex::from_json_str(
        r#"{ "releases-index": [ { "channel-version": "8.0.300" } ] }"#,
    )
    .expect("index must parse");
    assert_eq!(index.channel_for_major("8"), Some("8.0.300"));
}

#[test]
fn release_index_returns_first_matching_entry() {
    let index = ReleaseIndex::from_json_str(
        r#"{ "releases-index": [ { "channel-version": "6.1" }, { "channel-version": "6.0" } ] }"#,
    )
    .expect("index must parse");
    assert_eq!(index.channel_for_major("6"), Some("6.1"));
}

#[test]
fn release_index_tolerates_missing_array() {
    let index = ReleaseIndex::from_json_str("{}").expect("empty document must parse");
    assert!(index.releases_index.is_empty());
}

#[test]
fn client_resolves_major_from_served_index() {
    let (url, server) = start_http_server(vec![ok_response(SAMPLE_INDEX)]);
    let client = test_client(&url);

    let channel = client.channel_for_major("8").expect("major 8 must resolve");

    assert_eq!(channel, "8.0");
    assert_eq!(server.join().expect("server thread must join"), 1);
}

#[test]
fn client_reports_channel_not_found() {
    let (url, server) = start_http_server(vec![ok_response(SAMPLE_INDEX)]);
    let client = test_client(&url);

    let err = client
        .channel_for_major("42")
        .expect_err("unknown major must fail");

    assert_eq!(
        err,
        SetupError::ChannelNotFound {
            major: "42".to_string(),
            url: url.clone(),
        }
    );
    server.join().expect("server thread must join");
}

#[test]
fn client_retries_server_errors_before_succeeding() {
    let (url, server) = start_http_server(vec![
        status_response("500 Internal Server Error"),
        status_response("503 Service Unavailable"),
        ok_response(SAMPLE_INDEX),
    ]);
    let client = test_client(&url);

    let channel = client
        .channel_for_major("9")
        .expect("fetch must succeed after bounded retries");

    assert_eq!(channel, "9.0");
    assert_eq!(server.join().expect("server thread must join"), 3);
}

#[test]
fn client_gives_up_after_three_attempts() {
    let (url, server) = start_http_server(vec![
        status_response("502 Bad Gateway"),
        status_response("502 Bad Gateway"),
        status_response("502 Bad Gateway"),
    ]);
    let client = test_client(&url);

    let err = client
        .channel_for_major("8")
        .expect_err("persistent server errors must fail");

    match err {
        SetupError::NetworkError { reason, .. } => {
            assert!(reason.contains("502"), "unexpected reason: {reason}");
            assert!(reason.contains("3 attempts"), "unexpected reason: {reason}");
        }
        other => panic!("expected network error, got {other:?}"),
    }
    assert_eq!(server.join().expect("server thread must join"), 3);
}

#[test]
fn client_does_not_retry_client_errors() {
    let (url, server) = start_http_server(vec![status_response("404 Not Found")]);
    let client = test_client(&url);

    let err = client
        .fetch_index()
        .expect_err("not found must fail without retry");

    assert!(matches!(err, SetupError::NetworkError { .. }));
    assert!(err.to_string().contains("404"));
    assert_eq!(server.join().expect("server thread must join"), 1);
}

#[test]
fn client_rejects_malformed_document() {
    let (url, server) = start_http_server(vec![ok_response("<html>not json</html>")]);
    let client = test_client(&url);

    let err = client
        .fetch_index()
        .expect_err("malformed body must fail");

    assert!(err.to_string().contains("invalid release index document"));
    server.join().expect("server thread must join");
}

#[test]
fn from_env_prefers_explicit_url() {
    let client = ReleaseIndexClient::from_env(Some("http://127.0.0.1:9/index.json"))
        .expect("client must build");
    assert_eq!(client.url(), "http://127.0.0.1:9/index.json");
}

fn test_client(url: &str) -> ReleaseIndexClient {
    ReleaseIndexClient::new(url)
        .expect("client must build")
        .with_retry_backoff(Duration::ZERO)
}

fn ok_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

fn status_response(status: &str) -> String {
    format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
}

fn start_http_server(responses: Vec<String>) -> (String, JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("must bind index test server");
    let address = listener
        .local_addr()
        .expect("must read index test server address");
    let url = format!("http://{address}/releases-index.json");
    let handle = std::thread::spawn(move || {
        let mut served = 0;
        for response in responses {
            let (mut stream, _) = listener.accept().expect("must accept index test client");
            let mut request_buffer = [0_u8; 2048];
            let _ = stream.read(&mut request_buffer);
            stream
                .write_all(response.as_bytes())
                .expect("must write index test response");
            stream.flush().expect("must flush index test response");
            served += 1;
        }
        served
    });
    (url, handle)
}
