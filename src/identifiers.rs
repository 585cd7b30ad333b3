//! Type-safe identifiers.
//!
//! A [`ChannelId`] names one channel construction. The manager stamps every
//! handler it binds with the id of the channel it was bound to, so events
//! arriving from a replaced channel can be told apart from live ones.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// ChannelId
// ============================================================================

/// Next id to hand out. Starts at 1 so 0 never names a channel.
static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a constructed channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Allocates the next channel id.
    #[inline]
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch-{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_monotonic() {
        let first = ChannelId::next();
        let second = ChannelId::next();
        assert!(second > first);
        assert_ne!(first.as_u64(), 0);
    }

    #[test]
    fn test_display() {
        let id = ChannelId(7);
        assert_eq!(id.to_string(), "ch-7");
    }
}
