//! Channel abstraction.
//!
//! A channel is one duplex, text-framed connection. The manager never owns a
//! socket directly; it asks a [`Connector`] for a fresh channel on every
//! (re)connect and observes it through the handler bound at construction.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Close code for a normal closure.
pub const CLOSE_NORMAL: u16 = 1000;

/// Close code reported when the peer sent a close frame without a status.
pub const CLOSE_NO_STATUS: u16 = 1005;

/// Close code reported when the connection dropped without a close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;

// ============================================================================
// ChannelState
// ============================================================================

/// Lifecycle state of a channel.
///
/// Transitions only move forward:
/// `Connecting → Open → Closing → Closed` (`Open` and `Closing` may be skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelState {
    /// Handshake in progress.
    Connecting = 0,
    /// Ready to send and receive.
    Open = 1,
    /// Close requested, not yet complete.
    Closing = 2,
    /// Terminal.
    Closed = 3,
}

impl ChannelState {
    /// Decodes a state stored as its discriminant.
    ///
    /// Unknown values decode as [`ChannelState::Closed`].
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connecting,
            1 => Self::Open,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }

    /// Returns `true` once a close has been requested or completed.
    #[inline]
    #[must_use]
    pub const fn is_closing_or_closed(self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "CONNECTING",
            Self::Open => "OPEN",
            Self::Closing => "CLOSING",
            Self::Closed => "CLOSED",
        };
        f.write_str(name)
    }
}

// ============================================================================
// ChannelEvent
// ============================================================================

/// A low-level event emitted by a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The channel reached [`ChannelState::Open`].
    Open,
    /// A text frame arrived.
    Message {
        /// Raw frame content.
        text: String,
    },
    /// The channel reached [`ChannelState::Closed`].
    Close {
        /// WebSocket close code.
        code: u16,
        /// Close reason sent by the peer, possibly empty.
        reason: String,
    },
    /// A transport failure occurred. A `Close` event follows.
    Error {
        /// Description of the failure.
        message: String,
    },
}

impl ChannelEvent {
    /// Creates a message event.
    #[inline]
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    /// Creates a close event.
    #[inline]
    pub fn close(code: u16, reason: impl Into<String>) -> Self {
        Self::Close {
            code,
            reason: reason.into(),
        }
    }

    /// Creates an error event.
    #[inline]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Short event name, used in logs.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Message { .. } => "message",
            Self::Close { .. } => "close",
            Self::Error { .. } => "error",
        }
    }
}

// ============================================================================
// ChannelRequest
// ============================================================================

/// Parameters for constructing a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRequest {
    /// `ws://` or `wss://` URI.
    pub endpoint: String,
    /// Requested sub-protocols. Empty means none.
    pub sub_protocols: Vec<String>,
}

impl ChannelRequest {
    /// Creates a request for the given endpoint and sub-protocols.
    #[inline]
    pub fn new(endpoint: impl Into<String>, sub_protocols: Vec<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            sub_protocols,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Handler bound to a channel at construction.
///
/// Called once per event. Implementations must deliver events from their own
/// execution context, never from inside [`Connector::open`] or any
/// [`Channel`] method.
pub type ChannelHandler = Arc<dyn Fn(ChannelEvent) + Send + Sync>;

/// One live duplex connection.
pub trait Channel: Send + Sync {
    /// Returns the current lifecycle state.
    fn state(&self) -> ChannelState;

    /// Sends one text frame.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::ChannelNotOpen`] if the channel is not open
    /// - [`crate::Error::ConnectionClosed`] if the I/O side has gone away
    fn send(&self, text: &str) -> Result<()>;

    /// Requests closure. Idempotent; the `Close` event follows asynchronously.
    fn close(&self);
}

/// Factory that constructs channels.
pub trait Connector: Send + Sync {
    /// Constructs a new channel and binds `handler` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel cannot be constructed at all
    /// (malformed request, no runtime). Connection failures after
    /// construction are reported as `Error` + `Close` events instead.
    fn open(&self, request: &ChannelRequest, handler: ChannelHandler) -> Result<Arc<dyn Channel>>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_through_u8() {
        for state in [
            ChannelState::Connecting,
            ChannelState::Open,
            ChannelState::Closing,
            ChannelState::Closed,
        ] {
            assert_eq!(ChannelState::from_u8(state as u8), state);
        }
        assert_eq!(ChannelState::from_u8(42), ChannelState::Closed);
    }

    #[test]
    fn test_is_closing_or_closed() {
        assert!(!ChannelState::Connecting.is_closing_or_closed());
        assert!(!ChannelState::Open.is_closing_or_closed());
        assert!(ChannelState::Closing.is_closing_or_closed());
        assert!(ChannelState::Closed.is_closing_or_closed());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ChannelState::Open.to_string(), "OPEN");
        assert_eq!(ChannelState::Closed.to_string(), "CLOSED");
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(
            ChannelEvent::close(CLOSE_NORMAL, "bye"),
            ChannelEvent::Close {
                code: 1000,
                reason: "bye".into()
            }
        );
        assert_eq!(ChannelEvent::message("{}").name(), "message");
        assert_eq!(ChannelEvent::error("boom").name(), "error");
    }
}
