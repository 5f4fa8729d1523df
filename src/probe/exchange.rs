//! Conversation with a connected plugin
//!
//! Two futures share one task: the reader dispatches every incoming frame, the
//! writer sends the discovery requests, waits out the listen window and then
//! signals the reader to stop. No frame is handled after that signal.

use std::fmt::Display;
use std::path::PathBuf;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use log::{info, warn};
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;

use crate::probe::config::ProbeConfig;
use crate::probe::persist::Persister;
use crate::probe::session::{Dispatched, Session, dispatch};

/// What the reader saw before it was stopped
#[derive(Debug, Default)]
pub struct ExchangeReport {
    pub session: Session,
    pub frames_received: usize,
    pub saved: Vec<PathBuf>,
}

/// Run the full send/listen sequence over an already split connection
pub async fn run_exchange<S, R, E>(
    mut sink: S,
    stream: R,
    config: &ProbeConfig,
    persister: &Persister,
) -> ExchangeReport
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let reader = read_loop(stream, Session::new(), persister, cancel_rx);
    let writer = async {
        send_requests(&mut sink, &config.requests, config).await;

        info!(
            "Listening for {} seconds... (Try changing equipment in-game!)",
            config.listen_window.as_secs_f32()
        );
        tokio::time::sleep(config.listen_window).await;

        let _ = cancel_tx.send(true);
        close_sink(&mut sink, config).await;
    };

    let (report, ()) = tokio::join!(reader, writer);
    report
}

async fn send_requests<S>(sink: &mut S, requests: &[String], config: &ProbeConfig)
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    info!("Sending discovery requests...");
    for request in requests {
        info!("Sending: {}", request);
        if let Err(e) = sink.send(Message::Text(request.clone())).await {
            warn!("Failed to send {}: {}", request, e);
        }
        tokio::time::sleep(config.send_interval).await;
    }
}

async fn close_sink<S>(sink: &mut S, config: &ProbeConfig)
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match tokio::time::timeout(config.close_timeout, sink.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::debug!("Close failed: {}", e),
        Err(_) => log::debug!("Close timed out after {:?}", config.close_timeout),
    }
}

async fn read_loop<R, E>(
    mut stream: R,
    mut session: Session,
    persister: &Persister,
    mut cancel: watch::Receiver<bool>,
) -> ExchangeReport
where
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut frames_received = 0;
    let mut saved = Vec::new();

    loop {
        let frame = tokio::select! {
            biased;
            _ = cancel.changed() => break,
            frame = stream.next() => frame,
        };

        let text = match frame {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    warn!("Ignoring non UTF-8 binary frame");
                    continue;
                }
            },
            Some(Ok(Message::Close(_))) | None => {
                info!("Connection closed.");
                break;
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                warn!("Read error: {}", e);
                info!("Connection closed.");
                break;
            }
        };

        frames_received += 1;
        if let Dispatched::Saved { path, .. } = dispatch(&text, &mut session, persister).await {
            saved.push(path);
        }
    }

    ExchangeReport {
        session,
        frames_received,
        saved,
    }
}
