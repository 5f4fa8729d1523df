use std::process;

use log::{LevelFilter, error, info};
use wikisync_tools::logging;
use wikisync_tools::probe::{self, ProbeConfig, ProbeReport};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = logging::init_logger(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!("WikiSync Protocol Tester");
    info!("Make sure RuneLite is running with WikiSync enabled.");

    let config = ProbeConfig::default();
    match probe::run_probe(&config).await {
        ProbeReport::Connected { port, username, frames_received, saved } => {
            info!(
                "Done with port {}: {} frames received, {} files saved, last username {}",
                port,
                frames_received,
                saved.len(),
                username
            );
        }
        ProbeReport::Exhausted { attempted } => {
            error!(
                "Could not connect to WikiSync on any port ({} tried, {}..={}).",
                attempted.len(),
                config.ports.start(),
                config.ports.end()
            );
            error!("Make sure RuneLite is running with WikiSync plugin enabled.");
        }
    }
}
