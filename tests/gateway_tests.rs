//! Gateway integration tests
//!
//! Exercise `QaClient` against a minimal local HTTP fixture so the
//! failure taxonomy and the answer extraction are verified over a real
//! socket, without touching the network.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use studysphere::config::GatewayConfig;
use studysphere::gateway::{GatewayFailure, QaClient};

/// Serve exactly one HTTP response on an ephemeral port, optionally
/// delaying it, and return the base URL.
fn serve_once(status_line: &str, body: &str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture addr");

    let response = format!(
        "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 8192];
            let _ = stream.read(&mut buf);
            thread::sleep(delay);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn config_for(endpoint: String, timeout: Duration) -> GatewayConfig {
    GatewayConfig { endpoint, timeout }
}

#[tokio::test]
async fn ask_extracts_text_field() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"text":"Osmosis is the diffusion of water."}"#,
        Duration::ZERO,
    );
    let client = QaClient::new(&config_for(endpoint, Duration::from_secs(5))).unwrap();

    let answer = client.ask("What is osmosis?").await.unwrap();
    assert_eq!(answer, "Osmosis is the diffusion of water.");
}

#[tokio::test]
async fn ask_falls_back_to_response_field() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"response":"B"}"#,
        Duration::ZERO,
    );
    let client = QaClient::new(&config_for(endpoint, Duration::from_secs(5))).unwrap();

    assert_eq!(client.ask("q").await.unwrap(), "B");
}

#[tokio::test]
async fn ask_serializes_unknown_shapes() {
    let endpoint = serve_once("HTTP/1.1 200 OK", "{}", Duration::ZERO);
    let client = QaClient::new(&config_for(endpoint, Duration::from_secs(5))).unwrap();

    assert_eq!(client.ask("q").await.unwrap(), "{}");
}

#[tokio::test]
async fn ask_maps_non_2xx_to_server_failure() {
    let endpoint = serve_once(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"error":"broken"}"#,
        Duration::ZERO,
    );
    let client = QaClient::new(&config_for(endpoint, Duration::from_secs(5))).unwrap();

    assert_eq!(
        client.ask("q").await.unwrap_err(),
        GatewayFailure::Server(500)
    );
}

#[tokio::test]
async fn ask_exceeding_timeout_is_a_timeout_failure() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"text":"too late"}"#,
        Duration::from_millis(800),
    );
    let client = QaClient::new(&config_for(endpoint, Duration::from_millis(150))).unwrap();

    assert_eq!(client.ask("q").await.unwrap_err(), GatewayFailure::Timeout);
}

#[tokio::test]
async fn ask_maps_refused_connection_to_network_failure() {
    // Bind and immediately drop to get an address nothing listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = QaClient::new(&config_for(
        format!("http://{addr}"),
        Duration::from_secs(2),
    ))
    .unwrap();

    match client.ask("q").await.unwrap_err() {
        GatewayFailure::Network(_) => {}
        other => panic!("expected a network failure, got {other:?}"),
    }
}
