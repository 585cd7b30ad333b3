//! Connection manager configuration.
//!
//! # Example
//!
//! ```
//! use socket_monitor::{ConnectionConfig, FeedbackMode};
//!
//! let config = ConnectionConfig::new("wss://example.test/socket")
//!     .with_sub_protocol("json")
//!     .with_feedback_mode(FeedbackMode::Modal)
//!     .with_auto_reconnect(false);
//!
//! assert!(config.has_valid_endpoint());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::feedback::Presentation;

// ============================================================================
// Constants
// ============================================================================

/// Insecure WebSocket scheme prefix.
pub const WS_SCHEME: &str = "ws://";

/// Secure WebSocket scheme prefix.
pub const WSS_SCHEME: &str = "wss://";

/// Returns `true` if `endpoint` starts with `ws://` or `wss://`.
#[inline]
#[must_use]
pub fn is_socket_endpoint(endpoint: &str) -> bool {
    endpoint.starts_with(WS_SCHEME) || endpoint.starts_with(WSS_SCHEME)
}

// ============================================================================
// FeedbackMode
// ============================================================================

/// How connection failures are shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FeedbackMode {
    /// Blocking dialog.
    Modal,
    /// Toast.
    #[default]
    Transient,
    /// Nothing is shown.
    None,
}

impl FeedbackMode {
    /// Presentation to use, or `None` when feedback is suppressed.
    #[inline]
    #[must_use]
    pub const fn presentation(self) -> Option<Presentation> {
        match self {
            Self::Modal => Some(Presentation::Modal),
            Self::Transient => Some(Presentation::Transient),
            Self::None => None,
        }
    }
}

// ============================================================================
// ConnectionConfig
// ============================================================================

/// Configuration for a [`crate::ConnectionManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// `ws://` or `wss://` URI. Stored trimmed.
    pub endpoint: String,

    /// Requested sub-protocols. Empty means none.
    pub sub_protocols: Vec<String>,

    /// Reconnect whenever the channel closes.
    pub auto_reconnect: bool,

    /// Log lifecycle events.
    pub verbose: bool,

    /// Gates both the "connection lost" message and the close callback.
    pub warn_on_loss: bool,

    /// How failures are shown.
    pub feedback_mode: FeedbackMode,

    /// Wait before reconnecting. Zero reconnects inline.
    pub reconnect_delay: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new("")
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ConnectionConfig {
    /// Creates a configuration for `endpoint` with default settings.
    #[must_use]
    pub fn new(endpoint: impl AsRef<str>) -> Self {
        Self {
            endpoint: endpoint.as_ref().trim().to_owned(),
            sub_protocols: Vec::new(),
            auto_reconnect: true,
            verbose: true,
            warn_on_loss: true,
            feedback_mode: FeedbackMode::Transient,
            reconnect_delay: Duration::ZERO,
        }
    }

    /// Returns `true` if the endpoint has a WebSocket scheme.
    #[inline]
    #[must_use]
    pub fn has_valid_endpoint(&self) -> bool {
        is_socket_endpoint(&self.endpoint)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ConnectionConfig {
    /// Adds one sub-protocol.
    #[inline]
    #[must_use]
    pub fn with_sub_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.sub_protocols.push(protocol.into());
        self
    }

    /// Replaces the sub-protocol list.
    #[inline]
    #[must_use]
    pub fn with_sub_protocols(
        mut self,
        protocols: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.sub_protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    /// Sets auto-reconnect.
    #[inline]
    #[must_use]
    pub fn with_auto_reconnect(mut self, enabled: bool) -> Self {
        self.auto_reconnect = enabled;
        self
    }

    /// Sets verbose logging.
    #[inline]
    #[must_use]
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Sets warn-on-loss.
    #[inline]
    #[must_use]
    pub fn with_warn_on_loss(mut self, enabled: bool) -> Self {
        self.warn_on_loss = enabled;
        self
    }

    /// Sets the feedback mode.
    #[inline]
    #[must_use]
    pub fn with_feedback_mode(mut self, mode: FeedbackMode) -> Self {
        self.feedback_mode = mode;
        self
    }

    /// Sets the reconnect delay.
    #[inline]
    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
