// HttpSource against a one-shot local HTTP server

use pmview::core::power_monitor::{poll_once, HttpSource, MetricsSource, PollEvent};
use pmview::PmError;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;
use url::Url;

/// Serve one request with the given status line and body, return the URL.
fn serve_once(status: &'static str, body: &'static str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let mut request = Vec::new();
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    Url::parse(&format!("http://{}/pm", addr)).unwrap()
}

fn source(url: Url) -> HttpSource {
    HttpSource::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_and_parse_reading() {
    let url = serve_once(
        "200 OK",
        r#"{"p":{"va":1200,"w":950},"i":{"rms":5.234},"v":{"rms":231.7}}"#,
    );

    match poll_once(&source(url)).await {
        PollEvent::Reading(reading) => {
            assert_eq!(reading.apparent_power, 1200);
            assert_eq!(reading.voltage_rms, 231.7);
        }
        PollEvent::Error(e) => panic!("unexpected error: {}", e),
    }
}

#[tokio::test]
async fn test_non_2xx_is_fetch_error() {
    let url = serve_once("503 Service Unavailable", "{}");

    let err = source(url).fetch().await.unwrap_err();
    assert!(matches!(err, PmError::Fetch(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let url = serve_once("200 OK", "<html>busy</html>");

    let err = source(url).fetch().await.unwrap_err();
    assert!(matches!(err, PmError::Parse(_)));
}

#[tokio::test]
async fn test_wrong_shape_is_parse_error() {
    let url = serve_once("200 OK", r#"{"p":{"va":"x","w":950},"i":{"rms":5.2},"v":{"rms":230}}"#);

    assert!(matches!(
        poll_once(&source(url)).await,
        PollEvent::Error(PmError::Parse(_))
    ));
}
