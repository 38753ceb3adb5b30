//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gaia_autochat::config::AppConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl MockRequest {
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

/// A canned response. Multiple chunks are sent with chunked encoding.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub chunks: Vec<String>,
}

impl MockResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            chunks: vec![body.to_string()],
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            chunks: vec![body.to_string()],
        }
    }

    pub fn stream<S: Into<String>>(chunks: impl IntoIterator<Item = S>) -> Self {
        Self {
            status: 200,
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }
}

/// Handle to a running mock backend.
#[derive(Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockBackend {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Start a programmable mock backend on an ephemeral port.
///
/// Every request is recorded before the handler runs.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        recorded.lock().unwrap().push(request.clone());
                        let response = f(request).await;
                        let _ = write_response(&mut socket, &response).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, requests }
}

async fn read_request(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    let body_end = buffer.len().min(head_end + content_length);
    let body = String::from_utf8_lossy(&buffer[head_end..body_end]).to_string();

    Some(MockRequest {
        method,
        path,
        headers,
        body,
    })
}

async fn write_response(socket: &mut TcpStream, response: &MockResponse) -> std::io::Result<()> {
    if response.chunks.len() <= 1 {
        let body = response.chunks.first().map(String::as_str).unwrap_or("");
        let raw = format!(
            "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response.status,
            body.len(),
            body
        );
        return socket.write_all(raw.as_bytes()).await;
    }

    let head = format!(
        "HTTP/1.1 {} Mock\r\nContent-Type: text/event-stream\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
        response.status
    );
    socket.write_all(head.as_bytes()).await?;
    for chunk in &response.chunks {
        socket
            .write_all(format!("{:x}\r\n{}\r\n", chunk.len(), chunk).as_bytes())
            .await?;
        socket.flush().await?;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    socket.write_all(b"0\r\n\r\n").await
}

/// One SSE content event.
pub fn sse_delta(content: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
    )
}

/// Config pointing every endpoint at `backend`, with millisecond pacing.
pub fn test_config(backend: &MockBackend) -> AppConfig {
    let mut config = AppConfig::default();
    config.endpoints.auth_url = backend.url("/auth");
    config.endpoints.node_list_url = backend.url("/nodes");
    config.endpoints.node_bind_url = backend.url("/bind");
    config.endpoints.chat_url_template = backend.url("/chat");
    config.endpoints.persona_url = backend.url("/persona");
    config.retry.max_attempts = 5;
    config.retry.backoff_unit_ms = 10;
    config.retry.error_cooldown_ms = 5;
    config.pacing.interaction_delay_ms = 1;
    config.pacing.show_countdown = false;
    config.http.request_secs = 5;
    config
}

/// Successful wallet-connect response.
pub fn auth_ok(access_token: &str, api_key: &str) -> MockResponse {
    MockResponse::json(
        200,
        serde_json::json!({
            "code": 0,
            "msg": "ok",
            "data": { "access_token": access_token, "api_key": api_key }
        }),
    )
}

/// Node list response from `(node_id, status)` pairs.
pub fn node_list(nodes: &[(&str, &str)]) -> MockResponse {
    let objects: Vec<_> = nodes
        .iter()
        .map(|(id, status)| serde_json::json!({ "node_id": id, "status": status }))
        .collect();
    MockResponse::json(
        200,
        serde_json::json!({ "code": 0, "data": { "objects": objects } }),
    )
}
