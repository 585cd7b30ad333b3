//! Error types for the socket monitor.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use serde_json::json;
//! use socket_monitor::{ConnectionManager, Result};
//!
//! fn ping(manager: &ConnectionManager) -> Result<()> {
//!     manager.emit(&json!({ "type": "ping" }))?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Contract | [`Error::InvalidPayload`], [`Error::NoChannel`] |
//! | Configuration | [`Error::InvalidEndpoint`], [`Error::Config`], [`Error::InvalidHeader`] |
//! | Connection | [`Error::ChannelNotOpen`], [`Error::ConnectionClosed`], [`Error::WebSocket`] |
//! | External | [`Error::Io`], [`Error::Json`] |
//!
//! Transport failures observed on a live channel are never returned from
//! event handlers; they surface through callbacks, logs and user feedback.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::http::header::InvalidHeaderValue;

use crate::transport::ChannelState;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Contract Errors
    // ========================================================================
    /// Payload handed to `emit` is not a keyed-value object.
    ///
    /// Arrays, primitives and `null` are rejected before anything is queued.
    #[error("Invalid payload: expected an object, found {found}")]
    InvalidPayload {
        /// JSON kind of the rejected payload.
        found: &'static str,
    },

    /// `emit` was called before any channel was created.
    #[error("No channel has been created")]
    NoChannel,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Endpoint does not start with `ws://` or `wss://`.
    #[error("Invalid endpoint: {endpoint:?}")]
    InvalidEndpoint {
        /// The rejected endpoint, trimmed.
        endpoint: String,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Sub-protocol list cannot be encoded as a header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Send attempted on a channel that is not open.
    #[error("Channel is not open (state: {state})")]
    ChannelNotOpen {
        /// State the channel was in.
        state: ChannelState,
    },

    /// Channel I/O task has terminated.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an invalid payload error.
    #[inline]
    pub fn invalid_payload(found: &'static str) -> Self {
        Self::InvalidPayload { found }
    }

    /// Creates an invalid endpoint error.
    #[inline]
    pub fn invalid_endpoint(endpoint: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a channel-not-open error.
    #[inline]
    pub fn channel_not_open(state: ChannelState) -> Self {
        Self::ChannelNotOpen { state }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the caller broke the `emit` contract.
    ///
    /// These errors are always signaled synchronously and never absorbed.
    #[inline]
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidPayload { .. } | Self::NoChannel)
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::ChannelNotOpen { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_payload("array");
        assert_eq!(
            err.to_string(),
            "Invalid payload: expected an object, found array"
        );
    }

    #[test]
    fn test_invalid_endpoint_display() {
        let err = Error::invalid_endpoint("http://example.test");
        assert_eq!(err.to_string(), "Invalid endpoint: \"http://example.test\"");
    }

    #[test]
    fn test_channel_not_open_display() {
        let err = Error::channel_not_open(ChannelState::Closing);
        assert_eq!(err.to_string(), "Channel is not open (state: CLOSING)");
    }

    #[test]
    fn test_is_contract_violation() {
        assert!(Error::invalid_payload("null").is_contract_violation());
        assert!(Error::NoChannel.is_contract_violation());
        assert!(!Error::ConnectionClosed.is_contract_violation());
        assert!(!Error::config("test").is_contract_violation());
    }

    #[test]
    fn test_is_connection_error() {
        assert!(Error::ConnectionClosed.is_connection_error());
        assert!(Error::channel_not_open(ChannelState::Connecting).is_connection_error());
        assert!(!Error::NoChannel.is_connection_error());
        assert!(!Error::invalid_endpoint("x").is_connection_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
