//! Outbound queue.
//!
//! Holds serialized frames submitted while the channel was not open.
//! Frames leave strictly in insertion order, and only after the channel
//! accepted them.

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;

use tracing::warn;

use crate::transport::{Channel, ChannelState};

// ============================================================================
// OutboundQueue
// ============================================================================

/// Unbounded FIFO of serialized payloads awaiting an open channel.
#[derive(Debug, Default)]
pub struct OutboundQueue {
    frames: VecDeque<String>,
}

impl OutboundQueue {
    /// Creates an empty queue.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }

    /// Appends a frame.
    #[inline]
    pub fn push(&mut self, frame: String) {
        self.frames.push_back(frame);
    }

    /// Number of queued frames.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sends queued frames in order while `channel` stays open.
    ///
    /// The open state is checked before every frame. The first frame that
    /// cannot be sent stays at the head of the queue together with everything
    /// behind it. Returns the number of frames sent.
    pub fn flush(&mut self, channel: &dyn Channel) -> usize {
        let mut sent = 0;

        while let Some(frame) = self.frames.front() {
            if channel.state() != ChannelState::Open {
                break;
            }

            if let Err(e) = channel.send(frame) {
                warn!(error = %e, remaining = self.frames.len(), "Flush interrupted");
                break;
            }

            self.frames.pop_front();
            sent += 1;
        }

        sent
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use proptest::prelude::*;

    use crate::transport::testing::{FakeChannel, FakeConnector};
    use crate::transport::{ChannelEvent, ChannelRequest, Connector};

    fn open_channel() -> Arc<FakeChannel> {
        let connector = FakeConnector::new();
        connector
            .open(&ChannelRequest::default(), Arc::new(|_: ChannelEvent| {}))
            .expect("fake open");
        let channel = connector.last();
        channel.fire(ChannelEvent::Open);
        channel
    }

    #[test]
    fn test_flush_sends_in_order_and_empties() {
        let channel = open_channel();
        let mut queue = OutboundQueue::new();
        queue.push("1".into());
        queue.push("2".into());
        queue.push("3".into());

        assert_eq!(queue.flush(channel.as_ref()), 3);
        assert!(queue.is_empty());
        assert_eq!(channel.sent(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_flush_on_closed_channel_keeps_everything() {
        let channel = open_channel();
        channel.set_state(ChannelState::Closed);

        let mut queue = OutboundQueue::new();
        queue.push("a".into());

        assert_eq!(queue.flush(channel.as_ref()), 0);
        assert_eq!(queue.len(), 1);
        assert!(channel.sent().is_empty());
    }

    #[test]
    fn test_failed_send_keeps_tail_in_order() {
        let channel = open_channel();
        channel.fail_after(2);

        let mut queue = OutboundQueue::new();
        for frame in ["a", "b", "c", "d"] {
            queue.push(frame.into());
        }

        assert_eq!(queue.flush(channel.as_ref()), 2);
        assert_eq!(queue.len(), 2);
        assert_eq!(channel.sent(), vec!["a", "b"]);

        // Next open delivers the rest, no duplicates.
        channel.fail_after(usize::MAX);
        assert_eq!(queue.flush(channel.as_ref()), 2);
        assert_eq!(channel.sent(), vec!["a", "b", "c", "d"]);
    }

    proptest! {
        #[test]
        fn test_flush_preserves_fifo(frames in prop::collection::vec("[a-z0-9]{0,8}", 0..32)) {
            let channel = open_channel();
            let mut queue = OutboundQueue::new();
            for frame in &frames {
                queue.push(frame.clone());
            }

            prop_assert_eq!(queue.flush(channel.as_ref()), frames.len());
            prop_assert!(queue.is_empty());
            prop_assert_eq!(channel.sent(), frames);
        }
    }
}
