//! WikiSync protocol prober
//!
//! Finds the plugin's websocket among a small range of loopback ports, sends a list
//! of candidate requests and saves any player data the plugin pushes back.
//!
//! A run moves through these phases:
//! 1. Scanning: ports are tried in ascending order until one accepts
//! 2. Connected: requests go out while a reader dispatches incoming frames
//! 3. Draining: after the listen window the reader is stopped and the socket closed
//!
//! If no port accepts, the run ends with [`ProbeReport::Exhausted`]. Once a port
//! has accepted, no other port is tried.

use std::path::PathBuf;

use futures_util::StreamExt;
use log::info;

pub mod config;
pub mod exchange;
pub mod message;
pub mod persist;
pub mod scanner;
pub mod session;

pub use config::ProbeConfig;
pub use persist::Persister;
pub use scanner::{Connector, ScanOutcome, WsConnector};
pub use session::Session;

/// Summary of one probe run
#[derive(Debug)]
pub enum ProbeReport {
    Connected {
        port: u16,
        username: String,
        frames_received: usize,
        saved: Vec<PathBuf>,
    },
    Exhausted {
        attempted: Vec<u16>,
    },
}

/// Probe the configured ports and talk to the first endpoint that accepts
pub async fn run_probe(config: &ProbeConfig) -> ProbeReport {
    let connector = WsConnector::new(config.clone());
    let persister = Persister::new(config.output_dir());

    match scanner::scan_ports(&connector, config.ports.clone()).await {
        ScanOutcome::Connected { port, connection } => {
            info!("Connected on port {}!", port);
            let (sink, stream) = connection.split();
            let report = exchange::run_exchange(sink, stream, config, &persister).await;
            ProbeReport::Connected {
                port,
                username: report.session.username().to_string(),
                frames_received: report.frames_received,
                saved: report.saved,
            }
        }
        ScanOutcome::Exhausted { attempted } => ProbeReport::Exhausted { attempted },
    }
}
