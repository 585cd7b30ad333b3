//! User-feedback dispatch.
//!
//! The manager never renders anything. It builds a [`Feedback`] value and
//! hands it to a [`FeedbackDispatcher`], which decides how to show it.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use super::category::{ErrorCategory, Severity};

// ============================================================================
// Presentation
// ============================================================================

/// How a feedback message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Presentation {
    /// Blocking dialog with an acknowledgement action.
    Modal,
    /// Toast that disappears on its own.
    Transient,
}

// ============================================================================
// AckAction
// ============================================================================

/// Action run when the user acknowledges a modal message.
///
/// Two actions are equal only if they share the same closure.
#[derive(Clone)]
pub struct AckAction(Arc<dyn Fn() + Send + Sync>);

impl AckAction {
    /// Wraps a closure.
    #[must_use]
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(action))
    }

    /// Runs the action.
    #[inline]
    pub fn acknowledge(&self) {
        (self.0)();
    }
}

impl fmt::Debug for AckAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AckAction")
    }
}

impl PartialEq for AckAction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for AckAction {}

// ============================================================================
// Feedback
// ============================================================================

/// A user-facing message keyed by error category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    /// Error category.
    pub kind: ErrorCategory,
    /// Severity of the message.
    pub severity: Severity,
    /// Short title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Extra detail such as a close reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Presentation style.
    pub presentation: Presentation,
    /// Acknowledgement action. Only carried by modal feedback.
    #[serde(skip)]
    pub on_acknowledge: Option<AckAction>,
}

impl Feedback {
    /// Creates feedback with the category's default copy.
    #[must_use]
    pub fn new(kind: ErrorCategory, presentation: Presentation) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            title: kind.title().to_owned(),
            message: kind.message().to_owned(),
            details: None,
            presentation,
            on_acknowledge: None,
        }
    }

    /// Attaches details. Empty strings are dropped.
    #[must_use]
    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details.filter(|d| !d.is_empty());
        self
    }

    /// Attaches an acknowledgement action. Dropped unless the feedback is modal.
    #[must_use]
    pub fn with_acknowledge(mut self, action: Option<AckAction>) -> Self {
        self.on_acknowledge = action.filter(|_| self.presentation == Presentation::Modal);
        self
    }
}

// ============================================================================
// FeedbackContext
// ============================================================================

/// Caller-supplied context for [`crate::ConnectionManager::classify_and_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackContext {
    /// Extra detail to show with the message.
    pub details: Option<String>,
    /// Run when the user acknowledges a modal message.
    pub on_acknowledge: Option<AckAction>,
}

impl FeedbackContext {
    /// Creates an empty context.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            details: None,
            on_acknowledge: None,
        }
    }

    /// Sets the details.
    #[inline]
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the acknowledgement action.
    #[must_use]
    pub fn with_acknowledge<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_acknowledge = Some(AckAction::new(action));
        self
    }
}

// ============================================================================
// FeedbackDispatcher
// ============================================================================

/// Renders feedback for the user.
pub trait FeedbackDispatcher: Send + Sync {
    /// Shows one feedback message.
    fn dispatch(&self, feedback: Feedback);
}

/// Dispatcher that writes feedback to the `tracing` log.
///
/// Used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl FeedbackDispatcher for TracingDispatcher {
    fn dispatch(&self, feedback: Feedback) {
        let details = feedback.details.as_deref().unwrap_or_default();
        match feedback.severity {
            Severity::Warning => warn!(
                kind = %feedback.kind,
                presentation = ?feedback.presentation,
                details,
                "{}: {}",
                feedback.title,
                feedback.message
            ),
            Severity::Error => error!(
                kind = %feedback.kind,
                presentation = ?feedback.presentation,
                details,
                "{}: {}",
                feedback.title,
                feedback.message
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use parking_lot::Mutex;

    /// Dispatcher that keeps everything it receives.
    #[derive(Default)]
    pub(crate) struct RecordingDispatcher {
        pub(crate) received: Mutex<Vec<Feedback>>,
    }

    impl RecordingDispatcher {
        pub(crate) fn kinds(&self) -> Vec<ErrorCategory> {
            self.received.lock().iter().map(|f| f.kind).collect()
        }
    }

    impl FeedbackDispatcher for RecordingDispatcher {
        fn dispatch(&self, feedback: Feedback) {
            self.received.lock().push(feedback);
        }
    }

    #[test]
    fn test_feedback_uses_category_copy() {
        let feedback = Feedback::new(ErrorCategory::NotFound, Presentation::Modal);
        assert_eq!(feedback.title, ErrorCategory::NotFound.title());
        assert_eq!(feedback.severity, Severity::Error);
        assert_eq!(feedback.presentation, Presentation::Modal);
        assert!(feedback.details.is_none());
    }

    #[test]
    fn test_empty_details_are_dropped() {
        let feedback = Feedback::new(ErrorCategory::ConnectionLost, Presentation::Transient)
            .with_details(Some(String::new()));
        assert!(feedback.details.is_none());

        let feedback = feedback.with_details(Some("server restart".into()));
        assert_eq!(feedback.details.as_deref(), Some("server restart"));
    }

    #[test]
    fn test_feedback_serializes_for_ui() {
        let feedback = Feedback::new(ErrorCategory::PermissionDenied, Presentation::Transient);
        let value = serde_json::to_value(&feedback).expect("serialize");
        assert_eq!(value["kind"], "PERMISSION_DENIED");
        assert_eq!(value["severity"], "WARNING");
        assert_eq!(value["presentation"], "TRANSIENT");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_context_builder() {
        let context = FeedbackContext::new().with_details("code 4004");
        assert_eq!(context.details.as_deref(), Some("code 4004"));
        assert!(context.on_acknowledge.is_none());
    }

    #[test]
    fn test_acknowledge_kept_only_for_modal() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        let action = AckAction::new(move || {
            handle.fetch_add(1, Ordering::SeqCst);
        });

        let transient = Feedback::new(ErrorCategory::NotFound, Presentation::Transient)
            .with_acknowledge(Some(action.clone()));
        assert!(transient.on_acknowledge.is_none());

        let modal = Feedback::new(ErrorCategory::NotFound, Presentation::Modal)
            .with_acknowledge(Some(action.clone()));
        assert_eq!(modal.on_acknowledge.as_ref(), Some(&action));

        if let Some(ack) = &modal.on_acknowledge {
            ack.acknowledge();
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);

        let value = serde_json::to_value(&modal).expect("serialize");
        assert!(value.get("on_acknowledge").is_none());
    }

    #[test]
    fn test_tracing_dispatcher_does_not_panic() {
        TracingDispatcher.dispatch(Feedback::new(ErrorCategory::Generic, Presentation::Modal));
    }
}
