use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{
    CLOSE_TIMEOUT, CONNECT_TIMEOUT, DISCOVERY_REQUESTS, LISTEN_WINDOW, ORIGIN, OUTPUT_ROOT,
    PORT_END, PORT_START, PROBE_HOST, PROTOCOL_NAME, SEND_INTERVAL, USER_AGENT,
};

/// Settings for one probe run
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Host name or loopback address to connect to
    pub host: String,

    /// Candidate ports, tried in ascending order
    pub ports: RangeInclusive<u16>,

    /// `Origin` header sent with the handshake
    pub origin: String,

    /// `User-Agent` header sent with the handshake
    pub user_agent: String,

    /// Request bodies sent in order once connected
    pub requests: Vec<String>,

    /// Pause after each request
    pub send_interval: Duration,

    /// Passive listening time after the last request
    pub listen_window: Duration,

    /// Per-port bound on connect plus handshake
    pub connect_timeout: Duration,

    /// Bound on flushing the close frame
    pub close_timeout: Duration,

    /// Root directory for saved payloads
    pub output_root: PathBuf,

    /// Subdirectory under `output_root` for this protocol
    pub protocol_name: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: PROBE_HOST.to_string(),
            ports: PORT_START..=PORT_END,
            origin: ORIGIN.to_string(),
            user_agent: USER_AGENT.to_string(),
            requests: DISCOVERY_REQUESTS.iter().map(|r| r.to_string()).collect(),
            send_interval: SEND_INTERVAL,
            listen_window: LISTEN_WINDOW,
            connect_timeout: CONNECT_TIMEOUT,
            close_timeout: CLOSE_TIMEOUT,
            output_root: PathBuf::from(OUTPUT_ROOT),
            protocol_name: PROTOCOL_NAME.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Websocket endpoint for `port`, e.g. `ws://localhost:37767/`
    pub fn endpoint(&self, port: u16) -> Result<Url, url::ParseError> {
        Url::parse(&format!("ws://{}:{}", self.host, port))
    }

    /// Directory saved payloads go to
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(&self.protocol_name)
    }
}
