#![cfg(feature = "http")]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use aqi_live::{GoogleAirQuality, GoogleCfg, LiveError};
use aqi_traits::LiveSource;
use secrecy::SecretString;

/// Serve one canned HTTP response; returns the endpoint URL and the captured request line.
fn serve_once(status: &str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap();
            }
        }
        let mut req_body = vec![0u8; content_length];
        reader.read_exact(&mut req_body).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        format!("{} {}", request_line.trim(), String::from_utf8_lossy(&req_body))
    });
    (format!("http://{addr}/v1/currentConditions:lookup"), handle)
}

fn cfg(endpoint: String) -> GoogleCfg {
    GoogleCfg {
        endpoint,
        latitude: 28.6139,
        longitude: 77.209,
        timeout: Duration::from_secs(5),
    }
}

#[test]
fn fetches_and_parses_lookup() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"indexes":[{"code":"uaqi","aqi":42,"category":"Good"}],
            "pollutants":[{"code":"pm25","concentration":{"value":12.5}}]}"#,
    );
    let client = GoogleAirQuality::new(cfg(url), SecretString::new("test-key".into())).unwrap();
    let reading = client.fetch().expect("reading");
    assert_eq!(reading.aqi, Some(42.0));
    assert_eq!(reading.pollutants.pm25, Some(12.5));

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /v1/currentConditions:lookup?key=test-key"));
    assert!(request.contains("\"extraComputations\""));
}

#[test]
fn http_error_status_is_reported() {
    let (url, server) = serve_once("403 Forbidden", r#"{"error":{"message":"API key not valid"}}"#);
    let client = GoogleAirQuality::new(cfg(url), SecretString::new("bad".into())).unwrap();
    match client.try_fetch() {
        Err(LiveError::Status { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn unreachable_endpoint_degrades_to_none() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut c = cfg(format!("http://127.0.0.1:{port}/lookup"));
    c.timeout = Duration::from_millis(500);
    let client = GoogleAirQuality::new(c, SecretString::new("k".into())).unwrap();
    assert!(client.fetch().is_none());
}

#[test]
fn missing_key_variable_is_reported() {
    let err = GoogleAirQuality::from_env(
        cfg("http://127.0.0.1:1/".into()),
        "AQI_LIVE_TEST_KEY_THAT_IS_NEVER_SET",
    )
    .unwrap_err();
    assert!(matches!(err, LiveError::MissingApiKey(ref v) if v == "AQI_LIVE_TEST_KEY_THAT_IS_NEVER_SET"));
}
