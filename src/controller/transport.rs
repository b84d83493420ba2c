//! WebSocket driver. Owns the socket on its own task and reports everything
//! it sees as [`TransportEvent`]s; the reconnect policy lives in
//! [`ConnectionMachine`].

use std::time::Duration;

use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::connection::{Action, ConnectionMachine, RECONNECT_DELAY};
use crate::error::SpectatorError;
use crate::model::wire::{ServerMessage, decode};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Clone, Debug, PartialEq)]
pub enum TransportEvent {
    Connecting { attempt: u64 },
    Connected,
    /// The socket closed, errored or could not be opened. A reconnect is
    /// already scheduled when this is sent.
    Disconnected { reason: String },
    Message(ServerMessage),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    /// Full socket URL, e.g. `ws://localhost:8000/ws`.
    pub url: String,
    pub reconnect_delay: Duration,
    /// Unbounded when `None`.
    pub connect_timeout: Option<Duration>,
}

impl TransportConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: RECONNECT_DELAY,
            connect_timeout: None,
        }
    }
}

/// Owner of the background socket task. Dropping it tears the transport down.
#[derive(Debug)]
pub struct TransportHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TransportHandle {
    /// Cancels any pending reconnect and closes the open socket. Idempotent.
    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            debug!("transport teardown requested");
            self.cancel.cancel();
        }
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Tears down and waits for the socket task to finish.
    pub async fn shutdown(mut self) {
        self.teardown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "transport task ended abnormally");
            }
        }
    }
}

impl Drop for TransportHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Starts connecting immediately and keeps reconnecting until torn down or
/// until `events` has no receiver left.
#[must_use]
pub fn spawn(config: TransportConfig, events: UnboundedSender<TransportEvent>) -> TransportHandle {
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run(config, events, cancel.clone()));
    TransportHandle {
        cancel,
        task: Some(task),
    }
}

enum PumpEnd {
    Closed(String),
    ConsumerGone,
}

async fn run(
    config: TransportConfig,
    events: UnboundedSender<TransportEvent>,
    cancel: CancellationToken,
) {
    let mut machine = ConnectionMachine::new(config.reconnect_delay);
    let mut action = machine.start();

    loop {
        match action {
            Action::Connect => {
                if events
                    .send(TransportEvent::Connecting {
                        attempt: machine.attempts(),
                    })
                    .is_err()
                {
                    break;
                }
                let opened = tokio::select! {
                    biased;
                    () = cancel.cancelled() => None,
                    result = connect(&config) => Some(result),
                };
                let Some(opened) = opened else {
                    action = machine.teardown();
                    continue;
                };

                match opened {
                    Ok(mut ws) => {
                        if machine.on_open() {
                            info!(url = %config.url, "connected");
                            if events.send(TransportEvent::Connected).is_err() {
                                close(&mut ws).await;
                                break;
                            }
                        }
                        let ended = tokio::select! {
                            biased;
                            () = cancel.cancelled() => None,
                            end = pump(&mut ws, &events) => Some(end),
                        };
                        match ended {
                            None => {
                                close(&mut ws).await;
                                action = machine.teardown();
                            }
                            Some(PumpEnd::ConsumerGone) => {
                                close(&mut ws).await;
                                break;
                            }
                            Some(PumpEnd::Closed(reason)) => {
                                warn!(%reason, "connection lost");
                                action = machine.on_close();
                                if events
                                    .send(TransportEvent::Disconnected { reason })
                                    .is_err()
                                {
                                    break;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        warn!(url = %config.url, error = %e, "connect failed");
                        action = machine.on_error();
                        if events
                            .send(TransportEvent::Disconnected {
                                reason: e.to_string(),
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                }
            }
            Action::ScheduleReconnect(delay) => {
                debug!(?delay, "reconnect scheduled");
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => action = machine.teardown(),
                    () = tokio::time::sleep(delay) => action = machine.on_reconnect_due(),
                }
            }
            Action::Close | Action::None => break,
        }
    }
    debug!(attempts = machine.attempts(), "transport stopped");
}

async fn connect(config: &TransportConfig) -> Result<WsStream, SpectatorError> {
    let attempt = connect_async(config.url.as_str());
    let (ws, _response) = match config.connect_timeout {
        Some(limit) => tokio::time::timeout(limit, attempt)
            .await
            .map_err(|_| SpectatorError::Transport(format!("connect timed out after {limit:?}")))??,
        None => attempt.await?,
    };
    Ok(ws)
}

/// Forwards decoded text frames until the socket ends.
async fn pump(ws: &mut WsStream, events: &UnboundedSender<TransportEvent>) -> PumpEnd {
    while let Some(frame) = ws.next().await {
        match frame {
            Ok(Message::Text(text)) => match decode(text.as_str()) {
                Ok(message) => {
                    if events.send(TransportEvent::Message(message)).is_err() {
                        return PumpEnd::ConsumerGone;
                    }
                }
                Err(e) => warn!(error = %e, "dropping malformed message"),
            },
            Ok(Message::Close(frame)) => {
                let reason = frame
                    .map(|f| f.reason.as_str().to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "closed by server".to_string());
                return PumpEnd::Closed(reason);
            }
            // Binary, ping and pong; pings are answered by tungstenite itself.
            Ok(_) => {}
            Err(e) => return PumpEnd::Closed(e.to_string()),
        }
    }
    PumpEnd::Closed("stream ended".to_string())
}

async fn close(ws: &mut WsStream) {
    if let Err(e) = ws.close(None).await {
        debug!(error = %e, "close handshake failed");
    }
    // Drain until the peer acknowledges, bounded so teardown cannot hang.
    let drain = async { while ws.next().await.is_some() {} };
    let _ = tokio::time::timeout(Duration::from_millis(250), drain).await;
}
