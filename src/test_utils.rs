//! Test utilities shared across the codebase

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

/// Write `content` to `dir/name` and return the full path
pub fn write_json_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Port nothing listens on, found by binding an ephemeral port and releasing it
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("No local addr").port()
}

/// What a [`spawn_ws_server`] peer observed from its single client
#[derive(Debug, Default)]
pub struct ServerLog {
    pub origin: Option<String>,
    pub user_agent: Option<String>,
    pub received: Vec<String>,
}

/// Start a websocket server on an ephemeral loopback port that accepts one client,
/// pushes `frames` to it, then records text frames until the client goes away
pub async fn spawn_ws_server(frames: Vec<Message>) -> (u16, JoinHandle<ServerLog>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("Failed to accept");
        let headers = Arc::new(Mutex::new(ServerLog::default()));
        let headers_in_callback = headers.clone();
        let record_headers = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let mut log = headers_in_callback.lock().unwrap();
            log.origin = header_value(req, "Origin");
            log.user_agent = header_value(req, "User-Agent");
            Ok(resp)
        };
        let ws = tokio_tungstenite::accept_hdr_async(stream, record_headers)
            .await
            .expect("Handshake failed");

        let (mut sink, mut stream) = ws.split();
        for frame in frames {
            sink.send(frame).await.expect("Failed to send frame");
        }

        let mut received = Vec::new();
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => received.push(text),
                Message::Close(_) => break,
                _ => {}
            }
        }

        let mut log = std::mem::take(&mut *headers.lock().unwrap());
        log.received = received;
        log
    });

    (port, handle)
}

fn header_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
