//! In-memory channel doubles for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::{Error, Result};

use super::channel::{Channel, ChannelEvent, ChannelHandler, ChannelRequest, ChannelState, Connector};

/// Channel that records traffic and lets the test drive its events.
pub(crate) struct FakeChannel {
    pub(crate) request: ChannelRequest,
    state: Mutex<ChannelState>,
    sent: Mutex<Vec<String>>,
    close_calls: AtomicUsize,
    handler: ChannelHandler,
    /// When set, `send` fails once this many frames have been sent.
    fail_after: Mutex<Option<usize>>,
}

impl FakeChannel {
    /// Sets the state and delivers the event, like a real transport would.
    pub(crate) fn fire(&self, event: ChannelEvent) {
        match event {
            ChannelEvent::Open => *self.state.lock() = ChannelState::Open,
            ChannelEvent::Close { .. } => *self.state.lock() = ChannelState::Closed,
            _ => {}
        }
        (self.handler)(event);
    }

    pub(crate) fn set_state(&self, state: ChannelState) {
        *self.state.lock() = state;
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_after(&self, frames: usize) {
        *self.fail_after.lock() = Some(frames);
    }
}

impl Channel for FakeChannel {
    fn state(&self) -> ChannelState {
        *self.state.lock()
    }

    fn send(&self, text: &str) -> Result<()> {
        let state = self.state();
        if state != ChannelState::Open {
            return Err(Error::channel_not_open(state));
        }
        let mut sent = self.sent.lock();
        if let Some(limit) = *self.fail_after.lock()
            && sent.len() >= limit
        {
            return Err(Error::ConnectionClosed);
        }
        sent.push(text.to_owned());
        Ok(())
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        if !state.is_closing_or_closed() {
            *state = ChannelState::Closing;
        }
    }
}

/// Connector that hands out [`FakeChannel`]s and remembers each one.
#[derive(Default)]
pub(crate) struct FakeConnector {
    channels: Mutex<Vec<Arc<FakeChannel>>>,
    /// Endpoints `open` fails for, like a URI the transport cannot parse.
    refused: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn opened(&self) -> usize {
        self.channels.lock().len()
    }

    /// Returns the most recently constructed channel.
    pub(crate) fn last(&self) -> Arc<FakeChannel> {
        Arc::clone(self.channels.lock().last().expect("no channel constructed"))
    }

    pub(crate) fn nth(&self, index: usize) -> Arc<FakeChannel> {
        Arc::clone(&self.channels.lock()[index])
    }

    /// Makes `open` fail for `endpoint` from now on.
    pub(crate) fn refuse(&self, endpoint: &str) {
        self.refused.lock().push(endpoint.to_owned());
    }
}

impl Connector for FakeConnector {
    fn open(&self, request: &ChannelRequest, handler: ChannelHandler) -> Result<Arc<dyn Channel>> {
        if self.refused.lock().contains(&request.endpoint) {
            return Err(Error::config(format!("cannot parse {:?}", request.endpoint)));
        }
        let channel = Arc::new(FakeChannel {
            request: request.clone(),
            state: Mutex::new(ChannelState::Connecting),
            sent: Mutex::new(Vec::new()),
            close_calls: AtomicUsize::new(0),
            handler,
            fail_after: Mutex::new(None),
        });
        self.channels.lock().push(Arc::clone(&channel));
        Ok(channel)
    }
}
