//! Socket Monitor - self-healing WebSocket client manager.
//!
//! This library wraps one persistent duplex connection and keeps it usable
//! for the rest of an application:
//!
//! - Connects to a `ws://` / `wss://` endpoint with optional sub-protocols
//! - Reconnects whenever the connection closes (configurable)
//! - Queues outbound JSON objects until the connection is open
//! - Parses inbound frames as JSON before handing them to callbacks
//! - Turns failures and server status codes into user-facing feedback
//!
//! # Architecture
//!
//! - **Manager**: [`ConnectionManager`] owns configuration, callbacks, the
//!   outbound queue and the live channel
//! - **Transport**: a [`Connector`] builds one [`Channel`] per (re)connect;
//!   [`WsConnector`] runs each socket on its own tokio task
//! - **Feedback**: an [`ErrorCategory`] taxonomy plus a pluggable
//!   [`FeedbackDispatcher`]
//!
//! # Quick Start
//!
//! ```no_run
//! use serde_json::{Value, json};
//! use socket_monitor::{ConnectionConfig, ConnectionManager, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let manager = ConnectionManager::<Value>::builder()
//!         .config(ConnectionConfig::new("wss://example.test/socket"))
//!         .on_open(|_, _, _| println!("connected"))
//!         .on_message(|payload, _, _| println!("received: {payload:?}"))
//!         .build();
//!
//!     // Sent as soon as the channel opens.
//!     manager.emit(&json!({ "type": "subscribe", "topic": "prices" }))?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     manager.set_auto_reconnect(false);
//!     manager.close();
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`manager`] | [`ConnectionManager`], configuration and outbound queue |
//! | [`feedback`] | Error taxonomy and feedback dispatch |
//! | [`transport`] | Channel abstraction and WebSocket transport |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Channel identifiers |
//! | [`storage`] | Persisted monitor form state |
//! | [`payload`] | Payload composition from free-form text |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Error taxonomy and user feedback.
pub mod feedback;

/// Type-safe identifiers.
pub mod identifiers;

/// Connection manager.
///
/// Use [`ConnectionManager::builder()`] to create a configured manager.
pub mod manager;

/// Payload composition.
pub mod payload;

/// Persisted monitor form state.
pub mod storage;

/// Channel abstraction and WebSocket transport.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Manager types
pub use manager::{
    Callback, ConnectionConfig, ConnectionManager, EventSlot, FeedbackMode, ManagerBuilder,
};

// Error types
pub use error::{Error, Result};

// Feedback types
pub use feedback::{
    AckAction, ErrorCategory, Feedback, FeedbackContext, FeedbackDispatcher, Presentation,
    Severity, TracingDispatcher,
};

// Transport types
pub use transport::{Channel, ChannelEvent, ChannelState, Connector, WsConnector};

// Identifier types
pub use identifiers::ChannelId;

// Storage and payload helpers
pub use payload::compose_payload;
pub use storage::{MonitorRecord, RecordStore};
