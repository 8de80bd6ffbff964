//! Minimal single-request Hasura stand-in for binary tests.
//!
//! Binds an ephemeral local port and answers the first HTTP request with a
//! canned JSON body, which is all the metadata fetch needs.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

/// Serve `body` as a `200 application/json` response for a single request.
/// Returns the base endpoint URL and the server thread handle.
pub(crate) fn serve_metadata_once(body: String) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("should bind stub listener");
    let addr = listener.local_addr().expect("should read bound address");

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("should accept connection");
        consume_request(&mut stream);

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream
            .write_all(response.as_bytes())
            .expect("should write stub response");
    });

    (format!("http://{addr}"), handle)
}

/// Read the full request (headers plus `Content-Length` body) before
/// responding, so the client never sees a reset mid-write.
fn consume_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).expect("should read request bytes");
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(body_start) = headers_end(&buf) {
            let content_length = parse_content_length(&buf[..body_start]);
            if buf.len() >= body_start + content_length {
                return;
            }
        }
    }
}

fn headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

fn parse_content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())?
        })
        .unwrap_or(0)
}
