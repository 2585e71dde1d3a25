//! Test doubles shared by the correction and feature tests.

use crate::config::CorrectionConfig;
use crate::correction::client::CorrectionClient;
use crate::correction::remote::RemoteCorrectionService;
use crate::error::{GrammarFixError, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Scripted behaviour for [`MockClient`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Nothing,
    Fail(String),
    /// Sleep, then answer with the text.
    Delayed(Duration, String),
}

/// Client that replays a scripted reply and counts invocations.
pub struct MockClient {
    reply: MockReply,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockReply::Fail(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CorrectionClient for MockClient {
    async fn correct_text(&self, text: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        match &self.reply {
            MockReply::Text(reply) => Ok(Some(reply.clone())),
            MockReply::Nothing => Ok(None),
            MockReply::Fail(message) => Err(GrammarFixError::Other(message.clone())),
            MockReply::Delayed(delay, reply) => {
                tokio::time::sleep(*delay).await;
                Ok(Some(reply.clone()))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// An HTTP request as received by [`serve_once`].
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serve exactly one HTTP response on a loopback port.
///
/// Returns the endpoint URL and a handle resolving to the captured request.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason_phrase(status),
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        drop(stream.shutdown().await);
        request
    });
    (format!("http://{addr}/v1/chat/completions"), handle)
}

/// Accept one connection, read the request, and never answer.
pub async fn serve_silent(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _request = read_request(&mut stream).await;
        tokio::time::sleep(hold).await;
    });
    format!("http://{addr}/v1/chat/completions")
}

/// An endpoint on a port nobody listens on.
pub async fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1/chat/completions")
}

/// Remote service pointed at `endpoint`, bypassing any system proxy.
pub fn remote_service(endpoint: &str, read_timeout: Duration) -> RemoteCorrectionService {
    let config = CorrectionConfig {
        api_key: Some("sk-test".to_string()),
        endpoint: endpoint.to_string(),
        read_timeout_ms: read_timeout.as_millis() as u64,
        ..CorrectionConfig::default()
    };
    let http = reqwest::Client::builder()
        .no_proxy()
        .connect_timeout(config.connect_timeout())
        .read_timeout(config.read_timeout())
        .build()
        .unwrap();
    RemoteCorrectionService::with_http_client(http, "sk-test", &config)
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();
    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request body");
        buf.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string(),
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
