//! Error taxonomy and status-code classification.
//!
//! The server reports failures with application status codes in the
//! `4000..=5999` range. [`ErrorCategory::from_status`] is a pure function
//! over that table; reporting is done separately by the dispatcher.
//!
//! | Code | Category |
//! |------|----------|
//! | 4000 | [`ErrorCategory::BadRequest`] |
//! | 4001 | [`ErrorCategory::AuthFailed`] |
//! | 4003 | [`ErrorCategory::PermissionDenied`] |
//! | 4004 | [`ErrorCategory::NotFound`] |
//! | 5000 | [`ErrorCategory::InternalError`] |
//! | other | [`ErrorCategory::Generic`] |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// Status Codes
// ============================================================================

/// Invalid JSON or missing required fields.
pub const STATUS_BAD_REQUEST: u16 = 4000;

/// Authentication failed.
pub const STATUS_AUTH_FAILED: u16 = 4001;

/// Permission not granted.
pub const STATUS_PERMISSION_DENIED: u16 = 4003;

/// Unreachable resource.
pub const STATUS_NOT_FOUND: u16 = 4004;

/// Internal server error.
pub const STATUS_INTERNAL_ERROR: u16 = 5000;

// ============================================================================
// Severity
// ============================================================================

/// How alarming a feedback message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Something the user may be able to fix.
    Warning,
    /// The operation failed.
    Error,
}

// ============================================================================
// ErrorCategory
// ============================================================================

/// Stable, user-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// The requested resource does not exist.
    NotFound,
    /// The caller is not allowed to use the resource.
    PermissionDenied,
    /// Credentials were rejected.
    AuthFailed,
    /// The request was malformed.
    BadRequest,
    /// The server failed internally.
    InternalError,
    /// The connection was lost.
    ConnectionLost,
    /// Anything else.
    Generic,
}

impl ErrorCategory {
    /// All categories, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::NotFound,
        Self::PermissionDenied,
        Self::AuthFailed,
        Self::BadRequest,
        Self::InternalError,
        Self::ConnectionLost,
        Self::Generic,
    ];

    /// Maps a server status code to its category.
    ///
    /// Unrecognized codes map to [`ErrorCategory::Generic`].
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            STATUS_NOT_FOUND => Self::NotFound,
            STATUS_PERMISSION_DENIED => Self::PermissionDenied,
            STATUS_AUTH_FAILED => Self::AuthFailed,
            STATUS_BAD_REQUEST => Self::BadRequest,
            STATUS_INTERNAL_ERROR => Self::InternalError,
            _ => Self::Generic,
        }
    }

    /// Severity shown alongside the message.
    #[inline]
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::PermissionDenied => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NotFound => "Resource not found",
            Self::PermissionDenied => "Unauthorized service",
            Self::AuthFailed => "Authentication failed",
            Self::BadRequest => "Bad request",
            Self::InternalError => "Internal error",
            Self::ConnectionLost => "Network error",
            Self::Generic => "Request failed",
        }
    }

    /// Default message body.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "The requested resource is unavailable or does not exist.",
            Self::PermissionDenied => "You are not allowed to use this service.",
            Self::AuthFailed => "The server rejected your credentials.",
            Self::BadRequest => "The request is malformed or misses required fields.",
            Self::InternalError => "The server ran into an internal error.",
            Self::ConnectionLost => "The socket connection has been lost.",
            Self::Generic => "An error occurred while processing the request.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "NOT_FOUND",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::AuthFailed => "AUTH_FAILED",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConnectionLost => "CONNECTION_LOST",
            Self::Generic => "GENERIC",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Tests
// ============================================================================
