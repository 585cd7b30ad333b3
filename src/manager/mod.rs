//! Connection manager module.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConnectionManager`] | Owns the channel, queue and callbacks |
//! | [`ManagerBuilder`] | Fluent construction with injectable connector and dispatcher |
//! | [`ConnectionConfig`] | Endpoint, sub-protocols and behavior flags |
//! | [`FeedbackMode`] | How failures are shown |
//! | [`OutboundQueue`] | Payloads waiting for the channel to open |
//!
//! # Example
//!
//! ```no_run
//! use serde_json::{Value, json};
//! use socket_monitor::{ConnectionConfig, ConnectionManager, FeedbackMode};
//!
//! # async fn example() -> socket_monitor::Result<()> {
//! let manager = ConnectionManager::<Value>::new(
//!     ConnectionConfig::new("ws://localhost:9000/feed")
//!         .with_feedback_mode(FeedbackMode::Modal),
//! );
//!
//! manager.set_on_close_callback(|_, event, _| println!("closed: {event:?}"));
//! manager.emit(&json!({ "type": "hello" }))?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Configuration and endpoint validation.
pub mod config;

/// Core manager implementation.
pub mod core;

/// Outbound payload queue.
pub mod queue;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ConnectionConfig, FeedbackMode, WS_SCHEME, WSS_SCHEME, is_socket_endpoint};
pub use core::{Callback, ConnectionManager, EventSlot, ManagerBuilder};
pub use queue::OutboundQueue;
