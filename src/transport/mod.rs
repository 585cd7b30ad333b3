//! Channel transport layer.
//!
//! This module defines the seam between the connection manager and the
//! network, plus the WebSocket implementation used in production.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   open(request, handler)   ┌──────────────────┐
//! │  ConnectionManager   │───────────────────────────►│    Connector     │
//! │                      │                            └────────┬─────────┘
//! │  send / close / state│◄──── Arc<dyn Channel> ──────────────┘
//! │                      │                            ┌──────────────────┐
//! │  handle_event        │◄──── ChannelEvent ─────────│  event loop task │
//! └──────────────────────┘                            └──────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `channel` | `Channel` / `Connector` traits and event types |
//! | `websocket` | tokio-tungstenite channel and connector |

// ============================================================================
// Submodules
// ============================================================================

/// Channel and connector traits.
pub mod channel;

/// WebSocket channel over tokio-tungstenite.
pub mod websocket;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use channel::{
    CLOSE_ABNORMAL, CLOSE_NO_STATUS, CLOSE_NORMAL, Channel, ChannelEvent, ChannelHandler,
    ChannelRequest, ChannelState, Connector,
};
pub use websocket::{WsChannel, WsConnector};
