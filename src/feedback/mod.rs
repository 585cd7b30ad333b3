//! User-facing failure feedback.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `category` | Error taxonomy and status-code classifier |
//! | `dispatcher` | Feedback values and the dispatcher capability |

// ============================================================================
// Submodules
// ============================================================================

/// Error taxonomy and status-code classifier.
pub mod category;

/// Feedback values and dispatchers.
pub mod dispatcher;

// ============================================================================
// Re-exports
// ============================================================================

pub use category::{ErrorCategory, Severity};
pub use dispatcher::{
    AckAction, Feedback, FeedbackContext, FeedbackDispatcher, Presentation, TracingDispatcher,
};
