//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio::net::{TcpListener, TcpStream};
use whisper_client::TranscriptionClient;

pub const TRANSCRIPTIONS: &str = "/v1/audio/transcriptions";

pub fn client_for(base_url: &str) -> TranscriptionClient {
    TranscriptionClient::builder()
        .model("test_model")
        .api_key("test_api_key")
        .base_url(base_url)
        .build()
        .expect("client builds")
}

/// One decoded part of a multipart body.
#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FormPart {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.data).expect("utf-8 field")
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

fn disposition_param(line: &str, key: &str) -> Option<String> {
    let marker = format!("{}=\"", key);
    line.split(';').map(str::trim).find_map(|p| {
        p.strip_prefix(&marker)
            .and_then(|rest| rest.strip_suffix('"'))
            .map(str::to_string)
    })
}

/// Decode a multipart body, taking the boundary from its opening delimiter line.
/// Returns the boundary and the parts in wire order.
pub fn parse_multipart(body: &[u8]) -> (String, Vec<FormPart>) {
    assert!(body.starts_with(b"--"), "body does not open with a delimiter");
    let line_end = find(body, b"\r\n", 0).expect("delimiter line");
    let boundary = String::from_utf8(body[2..line_end].to_vec()).expect("ascii boundary");
    let delimiter = format!("\r\n--{}", boundary).into_bytes();

    let mut parts = Vec::new();
    let mut pos = line_end + 2;
    loop {
        let end = find(body, &delimiter, pos).expect("closing delimiter");
        let raw = &body[pos..end];
        let header_end = find(raw, b"\r\n\r\n", 0).expect("part headers");
        let headers = std::str::from_utf8(&raw[..header_end]).expect("ascii headers");

        let mut part = FormPart {
            name: String::new(),
            filename: None,
            content_type: None,
            data: raw[header_end + 4..].to_vec(),
        };
        for line in headers.split("\r\n") {
            let (key, value) = line.split_once(':').expect("header line");
            match key.trim().to_ascii_lowercase().as_str() {
                "content-disposition" => {
                    part.name = disposition_param(value, "name").expect("part name");
                    part.filename = disposition_param(value, "filename");
                }
                "content-type" => part.content_type = Some(value.trim().to_string()),
                _ => {}
            }
        }
        parts.push(part);

        pos = end + delimiter.len();
        if body[pos..].starts_with(b"--") {
            break;
        }
        assert!(body[pos..].starts_with(b"\r\n"));
        pos += 2;
    }
    (boundary, parts)
}

/// Yields one chunk of audio, then fails.
pub struct FailingReader {
    sent: bool,
}

impl FailingReader {
    pub fn new() -> Self {
        Self { sent: false }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if !self.sent {
            self.sent = true;
            buf.put_slice(b"partial audio");
            Poll::Ready(Ok(()))
        } else {
            Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "microphone unplugged",
            )))
        }
    }
}

/// Accept a single connection on an ephemeral port and hand it to `handler`.
pub async fn raw_server<F, Fut>(handler: F) -> String
where
    F: FnOnce(TcpStream) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            handler(socket).await;
        }
    });
    format!("http://{}", addr)
}

/// Read until the end of a chunked request body (or EOF).
pub async fn drain_request(socket: &mut TcpStream) {
    let mut seen = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                seen.extend_from_slice(&buf[..n]);
                if seen.windows(5).any(|w| w == b"0\r\n\r\n") {
                    return;
                }
            }
        }
    }
}
