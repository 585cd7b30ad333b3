//! WebSocket channel over tokio-tungstenite.
//!
//! [`WsConnector::open`] returns immediately with a [`WsChannel`] in the
//! `Connecting` state and spawns a tokio task that owns the socket.
//!
//! # Event Loop
//!
//! The task handles:
//!
//! - The client handshake (abandoned if `close()` arrives first)
//! - Incoming text frames, delivered as `Message` events
//! - Outgoing frames queued by [`WsChannel::send`]
//! - Close requests, remote closes and transport errors
//!
//! Every run ends with exactly one `Close` event. A transport error is
//! reported as `Error` immediately before that `Close`. Dropping the last
//! [`WsChannel`] handle ends the task and closes the socket.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

use super::channel::{
    CLOSE_ABNORMAL, CLOSE_NO_STATUS, CLOSE_NORMAL, Channel, ChannelEvent, ChannelHandler,
    ChannelRequest, ChannelState, Connector,
};

// ============================================================================
// ChannelCommand
// ============================================================================

/// Internal commands for the event loop.
enum ChannelCommand {
    /// Write a text frame.
    Send(String),
    /// Close the connection.
    Close,
}

// ============================================================================
// WsConnector
// ============================================================================

/// Constructs [`WsChannel`]s on the current tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl WsConnector {
    /// Creates a new connector.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Connector for WsConnector {
    fn open(&self, request: &ChannelRequest, handler: ChannelHandler) -> Result<Arc<dyn Channel>> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::config(format!("WebSocket channel needs a tokio runtime: {e}")))?;
        let client_request = build_client_request(request)?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let state = Arc::new(AtomicU8::new(ChannelState::Connecting as u8));

        runtime.spawn(run_event_loop(
            client_request,
            command_rx,
            Arc::clone(&state),
            handler,
        ));

        debug!(endpoint = %request.endpoint, "WebSocket channel spawned");

        Ok(Arc::new(WsChannel { command_tx, state }))
    }
}

/// Builds the handshake request, advertising sub-protocols when present.
fn build_client_request(request: &ChannelRequest) -> Result<Request> {
    let mut client_request = request.endpoint.as_str().into_client_request()?;

    if !request.sub_protocols.is_empty() {
        let value = HeaderValue::from_str(&request.sub_protocols.join(", "))?;
        client_request
            .headers_mut()
            .insert(SEC_WEBSOCKET_PROTOCOL, value);
    }

    Ok(client_request)
}

// ============================================================================
// WsChannel
// ============================================================================

/// Handle to one WebSocket connection.
///
/// All operations are non-blocking; frames are handed to the event loop task.
pub struct WsChannel {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ChannelCommand>,
    /// Lifecycle state (shared with event loop).
    state: Arc<AtomicU8>,
}

impl WsChannel {
    /// Moves `from → to` if the state is still `from`.
    fn transition(&self, from: ChannelState, to: ChannelState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Channel for WsChannel {
    fn state(&self) -> ChannelState {
        ChannelState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn send(&self, text: &str) -> Result<()> {
        let state = self.state();
        if state != ChannelState::Open {
            return Err(Error::channel_not_open(state));
        }

        self.command_tx
            .send(ChannelCommand::Send(text.to_owned()))
            .map_err(|_| Error::ConnectionClosed)
    }

    fn close(&self) {
        if self.transition(ChannelState::Open, ChannelState::Closing)
            || self.transition(ChannelState::Connecting, ChannelState::Closing)
        {
            let _ = self.command_tx.send(ChannelCommand::Close);
        }
    }
}

// ============================================================================
// Event Loop
// ============================================================================

/// Drives one connection from handshake to the final `Close` event.
async fn run_event_loop(
    request: Request,
    mut command_rx: mpsc::UnboundedReceiver<ChannelCommand>,
    state: Arc<AtomicU8>,
    handler: ChannelHandler,
) {
    let connect = connect_async(request);
    tokio::pin!(connect);

    let ws_stream = loop {
        tokio::select! {
            result = &mut connect => match result {
                Ok((ws_stream, _response)) => break ws_stream,
                Err(e) => {
                    debug!(error = %e, "WebSocket handshake failed");
                    handler(ChannelEvent::error(e.to_string()));
                    finish(&state, &handler, CLOSE_ABNORMAL, String::new());
                    return;
                }
            },

            command = command_rx.recv() => match command {
                // Nothing is sent before the channel is open.
                Some(ChannelCommand::Send(_)) => {}
                Some(ChannelCommand::Close) | None => {
                    debug!("Channel closed before the handshake completed");
                    finish(&state, &handler, CLOSE_ABNORMAL, String::new());
                    return;
                }
            },
        }
    };

    let opened = state
        .compare_exchange(
            ChannelState::Connecting as u8,
            ChannelState::Open as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .is_ok();

    let (mut ws_write, mut ws_read) = ws_stream.split();

    if !opened {
        // close() raced the handshake.
        let _ = ws_write.close().await;
        finish(&state, &handler, CLOSE_NORMAL, String::new());
        return;
    }

    handler(ChannelEvent::Open);

    let (code, reason) = loop {
        tokio::select! {
            // Incoming frames from the peer
            message = ws_read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        trace!(len = text.len(), "Text frame received");
                        handler(ChannelEvent::message(text.as_str()));
                    }

                    Some(Ok(Message::Close(frame))) => {
                        debug!(?frame, "WebSocket closed by remote");
                        let _ = ws_write.close().await;
                        break close_details(frame);
                    }

                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        handler(ChannelEvent::error(e.to_string()));
                        break (CLOSE_ABNORMAL, String::new());
                    }

                    None => {
                        debug!("WebSocket stream ended");
                        break (CLOSE_ABNORMAL, String::new());
                    }

                    // Ignore Binary, Ping, Pong
                    _ => {}
                }
            }

            // Commands from the channel handle
            command = command_rx.recv() => {
                match command {
                    Some(ChannelCommand::Send(text)) => {
                        if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                            warn!(error = %e, "Failed to write frame");
                            handler(ChannelEvent::error(e.to_string()));
                            break (CLOSE_ABNORMAL, String::new());
                        }
                    }

                    Some(ChannelCommand::Close) => {
                        debug!("Close requested");
                        let _ = ws_write.close().await;
                        break (CLOSE_NORMAL, String::new());
                    }

                    None => {
                        debug!("Channel handle dropped");
                        let _ = ws_write.close().await;
                        break (CLOSE_NORMAL, String::new());
                    }
                }
            }
        }
    };

    finish(&state, &handler, code, reason);
}

/// Extracts code and reason from a received close frame.
fn close_details(frame: Option<CloseFrame>) -> (u16, String) {
    frame.map_or_else(
        || (CLOSE_NO_STATUS, String::new()),
        |frame| (u16::from(frame.code), frame.reason.as_str().to_owned()),
    )
}

/// Marks the channel closed and emits the final `Close` event.
fn finish(state: &AtomicU8, handler: &ChannelHandler, code: u16, reason: String) {
    state.store(ChannelState::Closed as u8, Ordering::SeqCst);
    handler(ChannelEvent::Close { code, reason });
    debug!(code, "Event loop terminated");
}

// ============================================================================
// Tests
// ============================================================================
