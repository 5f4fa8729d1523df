//! Sequential port scan for the plugin's websocket endpoint

use std::ops::RangeInclusive;

use log::{info, warn};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::ConnectError;
use crate::probe::config::ProbeConfig;

pub type WsConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens a connection to one candidate port
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Connection;

    async fn connect(&self, port: u16) -> Result<Self::Connection, ConnectError>;
}

/// Result of walking the port range
#[derive(Debug)]
pub enum ScanOutcome<C> {
    Connected { port: u16, connection: C },
    Exhausted { attempted: Vec<u16> },
}

/// Try each port in ascending order and stop at the first one that accepts.
/// Refusals are skipped silently; other failures are logged.
pub async fn scan_ports<K: Connector>(
    connector: &K,
    ports: RangeInclusive<u16>,
) -> ScanOutcome<K::Connection> {
    let mut attempted = Vec::new();

    for port in ports {
        attempted.push(port);
        info!("Trying port {}...", port);

        match connector.connect(port).await {
            Ok(connection) => return ScanOutcome::Connected { port, connection },
            Err(e) if e.is_refused() => continue,
            Err(e) => {
                warn!("Error connecting to {}: {}", port, e);
                continue;
            }
        }
    }

    ScanOutcome::Exhausted { attempted }
}

/// Websocket connector that presents the configured browser headers
pub struct WsConnector {
    config: ProbeConfig,
}

impl WsConnector {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }
}

impl Connector for WsConnector {
    type Connection = WsConnection;

    async fn connect(&self, port: u16) -> Result<WsConnection, ConnectError> {
        let endpoint = self
            .config
            .endpoint(port)
            .map_err(|source| ConnectError::InvalidEndpoint {
                endpoint: format!("{}:{}", self.config.host, port),
                source,
            })?;

        let mut request = endpoint.as_str().into_client_request()?;
        let headers = request.headers_mut();
        headers.insert(
            "Origin",
            HeaderValue::from_str(&self.config.origin)
                .map_err(|_| ConnectError::InvalidHeader { header: "Origin" })?,
        );
        headers.insert(
            "User-Agent",
            HeaderValue::from_str(&self.config.user_agent)
                .map_err(|_| ConnectError::InvalidHeader { header: "User-Agent" })?,
        );

        let handshake = tokio_tungstenite::connect_async(request);
        match tokio::time::timeout(self.config.connect_timeout, handshake).await {
            Ok(Ok((ws, _response))) => Ok(ws),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(ConnectError::TimedOut(self.config.connect_timeout)),
        }
    }
}
