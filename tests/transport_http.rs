use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use autosketch::{AppConfig, HttpStrokeService, StrokeService, TransportError};

const TABLE: &str = "curveIndex,static,x,y\n0,0.0000,1.000,2.000\n0,0.0000,3.000,4.000";

/// Accepts one connection, answers with `status` and `body`, returns the raw request
fn serve_once(status: &'static str, body: &'static str) -> (AppConfig, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    let config = AppConfig {
        endpoint: format!("http://{}/", addr),
        ..AppConfig::default()
    };
    (config, handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_upload_is_multipart_csv() {
    let (config, server) = serve_once("200 OK", "CurveIndex,Static,X,Y\r\n0,0.0000,5.0,5.0\r\n");
    let service = HttpStrokeService::new(&config);

    let answer = service.exchange(TABLE).unwrap();
    assert!(answer.starts_with("CurveIndex,Static,X,Y"));

    let request = server.join().unwrap();
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /upload_csv HTTP/1.1\r\n"));
    assert!(lower.contains("content-type: multipart/form-data; boundary="));
    assert!(request.contains("Content-Disposition: form-data; name=\"file\"; filename=\"drawing.csv\""));
    assert!(request.contains("Content-Type: text/csv"));
    assert!(request.contains(TABLE));
}

#[test]
fn test_error_status_is_failure() {
    let (config, server) = serve_once(
        "500 Internal Server Error",
        "{\"error\": \"could not process\"}",
    );
    let service = HttpStrokeService::new(&config);

    let result = service.exchange(TABLE);
    assert!(matches!(result, Err(TransportError::Status(500))));
    server.join().unwrap();
}

#[test]
fn test_non_table_body_is_failure() {
    let (config, server) = serve_once("200 OK", "Deployed");
    let service = HttpStrokeService::new(&config);

    let result = service.exchange(TABLE);
    assert!(matches!(result, Err(TransportError::UnexpectedBody(_))));
    server.join().unwrap();
}

#[test]
fn test_oversized_body_is_failure() {
    let (mut config, server) =
        serve_once("200 OK", "curveIndex,static,x,y\n0,0.0000,1.000,1.000\n");
    config.max_response_bytes = 16;
    let service = HttpStrokeService::new(&config);

    let result = service.exchange(TABLE);
    assert!(matches!(result, Err(TransportError::TooLarge(16))));
    server.join().unwrap();
}

#[test]
fn test_unreachable_service() {
    // Bind then drop to get a port nobody listens on
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let config = AppConfig {
        endpoint: format!("http://{}", addr),
        ..AppConfig::default()
    };

    let result = HttpStrokeService::new(&config).exchange(TABLE);
    assert!(matches!(result, Err(TransportError::Request(_))));
}
