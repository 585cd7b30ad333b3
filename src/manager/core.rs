//! Connection manager.
//!
//! [`ConnectionManager`] owns one channel at a time, keeps it alive across
//! losses, buffers outbound payloads while it is not open, and turns
//! failures into [`Feedback`] for the user.
//!
//! # Event Handling
//!
//! Every channel is constructed with a handler stamped with its
//! [`ChannelId`]. Events carrying an id other than the live channel's are
//! stale and dropped. For live events the manager does its bookkeeping
//! first and then calls the user callback with
//! `(payload, raw_event, manager)`:
//!
//! | Event | Bookkeeping | Callback arguments |
//! |-------|-------------|--------------------|
//! | open | flush queue (after callback) | `(None, Some(event), self)` |
//! | message | parse JSON into `M` | `(Some(payload), None, self)` |
//! | close | loss feedback, reconnect | `(None, Some(event), self)` |
//! | error | close channel, request-error feedback | `(None, Some(event), self)` |
//!
//! User callbacks always run without the manager's lock held, so they may
//! call back into the manager.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, error, info, trace, warn};

use crate::error::{Error, Result};
use crate::feedback::{
    ErrorCategory, Feedback, FeedbackContext, FeedbackDispatcher, TracingDispatcher,
};
use crate::identifiers::ChannelId;
use crate::transport::{
    Channel, ChannelEvent, ChannelHandler, ChannelRequest, ChannelState, Connector, WsConnector,
};

use super::config::{ConnectionConfig, FeedbackMode, is_socket_endpoint};
use super::queue::OutboundQueue;

// ============================================================================
// Types
// ============================================================================

/// User callback for channel events.
///
/// Receives the parsed payload (message events only), the raw event
/// (open, close and error events only) and the manager itself.
pub type Callback<M> =
    Arc<dyn Fn(Option<&M>, Option<&ChannelEvent>, &ConnectionManager<M>) + Send + Sync>;

/// Identifies one of the four callback slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSlot {
    /// Channel opened.
    Open,
    /// Message received.
    Message,
    /// Channel closed.
    Close,
    /// Transport error.
    Error,
}

/// The four user callbacks.
struct Callbacks<M> {
    on_open: Option<Callback<M>>,
    on_message: Option<Callback<M>>,
    on_close: Option<Callback<M>>,
    on_error: Option<Callback<M>>,
}

impl<M> Default for Callbacks<M> {
    fn default() -> Self {
        Self {
            on_open: None,
            on_message: None,
            on_close: None,
            on_error: None,
        }
    }
}

impl<M> Callbacks<M> {
    fn slot_mut(&mut self, slot: EventSlot) -> &mut Option<Callback<M>> {
        match slot {
            EventSlot::Open => &mut self.on_open,
            EventSlot::Message => &mut self.on_message,
            EventSlot::Close => &mut self.on_close,
            EventSlot::Error => &mut self.on_error,
        }
    }
}

/// The channel currently owned by the manager.
#[derive(Clone)]
struct LiveChannel {
    id: ChannelId,
    channel: Arc<dyn Channel>,
}

/// Mutable manager state.
struct State<M> {
    config: ConnectionConfig,
    callbacks: Callbacks<M>,
    live: Option<LiveChannel>,
    queue: OutboundQueue,
}

impl<M> State<M> {
    /// Returns the live channel if `id` names it.
    fn live(&self, id: ChannelId) -> Option<Arc<dyn Channel>> {
        self.live
            .as_ref()
            .filter(|live| live.id == id)
            .map(|live| Arc::clone(&live.channel))
    }
}

/// Shared manager internals.
struct Inner<M> {
    state: Mutex<State<M>>,
    connector: Arc<dyn Connector>,
    dispatcher: Arc<dyn FeedbackDispatcher>,
}

// ============================================================================
// ConnectionManager
// ============================================================================

/// Manages one persistent duplex connection.
///
/// Cloning is cheap; all clones share the same channel, queue and callbacks.
///
/// # Type Parameters
///
/// - `M`: type inbound JSON frames are parsed into (default [`Value`])
///
/// # Example
///
/// ```no_run
/// use serde_json::{Value, json};
/// use socket_monitor::{ConnectionConfig, ConnectionManager};
///
/// # async fn example() -> socket_monitor::Result<()> {
/// let manager = ConnectionManager::<Value>::builder()
///     .config(ConnectionConfig::new("wss://example.test/socket"))
///     .on_message(|payload, _, _| println!("received {payload:?}"))
///     .build();
///
/// // Queued until the channel opens, then sent in order.
/// manager.emit(&json!({ "type": "subscribe" }))?;
/// # Ok(())
/// # }
/// ```
pub struct ConnectionManager<M = Value> {
    inner: Arc<Inner<M>>,
}

impl<M> Clone for ConnectionManager<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> fmt::Debug for ConnectionManager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ConnectionManager")
            .field("endpoint", &state.config.endpoint)
            .field("channel", &state.live.as_ref().map(|live| live.id))
            .field("queued", &state.queue.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ConnectionManager - Constructor
// ============================================================================

impl<M> ConnectionManager<M>
where
    M: DeserializeOwned + Send + Sync + 'static,
{
    /// Creates a manager with the WebSocket connector and tracing feedback.
    ///
    /// Connects immediately when the endpoint is valid; otherwise logs an
    /// error and waits for [`set_endpoint`](Self::set_endpoint).
    #[must_use]
    pub fn new(config: ConnectionConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Returns a builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ManagerBuilder<M> {
        ManagerBuilder::new()
    }

    fn from_parts(
        config: ConnectionConfig,
        callbacks: Callbacks<M>,
        connector: Arc<dyn Connector>,
        dispatcher: Arc<dyn FeedbackDispatcher>,
    ) -> Self {
        let manager = Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    config,
                    callbacks,
                    live: None,
                    queue: OutboundQueue::new(),
                }),
                connector,
                dispatcher,
            }),
        };

        let endpoint = manager.endpoint();
        if !is_socket_endpoint(&endpoint) {
            error!(%endpoint, "The endpoint is undefined or invalid for a WebSocket");
        } else if let Err(e) = manager.init() {
            error!(%endpoint, error = %e, "Failed to construct channel");
        }

        manager
    }
}

// ============================================================================
// ConnectionManager - Configuration
// ============================================================================

impl<M> ConnectionManager<M>
where
    M: DeserializeOwned + Send + Sync + 'static,
{
    /// Replaces the endpoint and reconnects to it.
    ///
    /// The value is trimmed first.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEndpoint`] if the trimmed value does not start with
    ///   `ws://` or `wss://`
    /// - any error from the connector if the channel cannot be constructed
    ///
    /// Nothing changes on error: the previous endpoint and channel stay.
    pub fn set_endpoint(&self, endpoint: &str) -> Result<()> {
        let endpoint = endpoint.trim();
        if !is_socket_endpoint(endpoint) {
            debug!(%endpoint, "Rejected endpoint");
            return Err(Error::invalid_endpoint(endpoint));
        }

        let mut state = self.inner.state.lock();
        let request = ChannelRequest::new(endpoint, state.config.sub_protocols.clone());
        self.replace_channel(&mut state, &request)?;
        state.config.endpoint = request.endpoint;
        Ok(())
    }

    /// Replaces the sub-protocols and reconnects, even if unchanged.
    ///
    /// Only stores the value when the endpoint is not a valid WebSocket URI.
    ///
    /// # Errors
    ///
    /// Any error from the connector. The previous sub-protocols and channel
    /// stay in that case.
    pub fn set_sub_protocols(
        &self,
        protocols: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<()> {
        let protocols: Vec<String> = protocols.into_iter().map(Into::into).collect();
        let mut state = self.inner.state.lock();

        if !is_socket_endpoint(&state.config.endpoint) {
            error!(
                endpoint = %state.config.endpoint,
                "Cannot connect: the endpoint is invalid for a WebSocket"
            );
            state.config.sub_protocols = protocols;
            return Ok(());
        }

        let request = ChannelRequest::new(state.config.endpoint.clone(), protocols);
        self.replace_channel(&mut state, &request)?;
        state.config.sub_protocols = request.sub_protocols;
        Ok(())
    }

    /// Enables or disables reconnecting after a close.
    pub fn set_auto_reconnect(&self, enabled: bool) {
        self.inner.state.lock().config.auto_reconnect = enabled;
    }

    /// Enables or disables lifecycle logging.
    pub fn set_verbose(&self, enabled: bool) {
        self.inner.state.lock().config.verbose = enabled;
    }

    /// Sets how failures are shown to the user.
    pub fn set_feedback_mode(&self, mode: FeedbackMode) {
        self.inner.state.lock().config.feedback_mode = mode;
    }

    /// Gates the "connection lost" message and the close callback.
    pub fn set_warn_on_loss(&self, enabled: bool) {
        self.inner.state.lock().config.warn_on_loss = enabled;
    }

    /// Returns the endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.inner.state.lock().config.endpoint.clone()
    }

    /// Returns the sub-protocols.
    #[must_use]
    pub fn sub_protocols(&self) -> Vec<String> {
        self.inner.state.lock().config.sub_protocols.clone()
    }

    /// Returns `true` if auto-reconnect is enabled.
    #[must_use]
    pub fn is_auto_reconnect(&self) -> bool {
        self.inner.state.lock().config.auto_reconnect
    }

    /// Returns `true` if lifecycle logging is enabled.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.inner.state.lock().config.verbose
    }

    /// Returns the feedback mode.
    #[must_use]
    pub fn feedback_mode(&self) -> FeedbackMode {
        self.inner.state.lock().config.feedback_mode
    }

    /// Returns `true` if connection loss is reported.
    #[must_use]
    pub fn warns_on_loss(&self) -> bool {
        self.inner.state.lock().config.warn_on_loss
    }

    /// Returns a snapshot of the configuration.
    #[must_use]
    pub fn config(&self) -> ConnectionConfig {
        self.inner.state.lock().config.clone()
    }
}

// ============================================================================
// ConnectionManager - Callbacks
// ============================================================================

impl<M> ConnectionManager<M>
where
    M: DeserializeOwned + Send + Sync + 'static,
{
    /// Sets the open callback. Applies to the live channel immediately.
    pub fn set_on_open_callback<F>(&self, callback: F)
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &Self) + Send + Sync + 'static,
    {
        self.set_callback(EventSlot::Open, Arc::new(callback));
    }

    /// Sets the message callback. Applies to the live channel immediately.
    pub fn set_on_message_callback<F>(&self, callback: F)
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &Self) + Send + Sync + 'static,
    {
        self.set_callback(EventSlot::Message, Arc::new(callback));
    }

    /// Sets the close callback. Applies to the live channel immediately.
    pub fn set_on_close_callback<F>(&self, callback: F)
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &Self) + Send + Sync + 'static,
    {
        self.set_callback(EventSlot::Close, Arc::new(callback));
    }

    /// Sets the error callback. Applies to the live channel immediately.
    pub fn set_on_error_callback<F>(&self, callback: F)
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &Self) + Send + Sync + 'static,
    {
        self.set_callback(EventSlot::Error, Arc::new(callback));
    }

    /// Stores a callback in `slot`.
    ///
    /// The handler bound to the channel reads the slot when an event fires,
    /// so the new callback takes effect for the next event.
    pub fn set_callback(&self, slot: EventSlot, callback: Callback<M>) {
        *self.inner.state.lock().callbacks.slot_mut(slot) = Some(callback);
    }

    /// Removes the callback in `slot`.
    pub fn clear_callback(&self, slot: EventSlot) {
        *self.inner.state.lock().callbacks.slot_mut(slot) = None;
    }

    /// Removes all four callbacks.
    pub fn clear_callbacks(&self) {
        self.inner.state.lock().callbacks = Callbacks::default();
    }

    /// Returns `true` if `slot` holds a callback.
    #[must_use]
    pub fn has_callback(&self, slot: EventSlot) -> bool {
        self.inner.state.lock().callbacks.slot_mut(slot).is_some()
    }
}

// ============================================================================
// ConnectionManager - Messaging
// ============================================================================

impl<M> ConnectionManager<M>
where
    M: DeserializeOwned + Send + Sync + 'static,
{
    /// Sends a JSON object, or queues it until the channel opens.
    ///
    /// Queued payloads are flushed in submission order before any later
    /// payload is sent directly.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPayload`] if `payload` does not serialize to a JSON object
    /// - [`Error::NoChannel`] if no channel exists
    /// - [`Error::Json`] if serialization fails
    pub fn emit<P>(&self, payload: &P) -> Result<()>
    where
        P: Serialize + ?Sized,
    {
        let frame = serde_json::to_string(payload)?;
        if !frame.starts_with('{') {
            return Err(Error::invalid_payload(json_kind(&frame)));
        }

        let mut state = self.inner.state.lock();
        let channel = state
            .live
            .as_ref()
            .map(|live| Arc::clone(&live.channel))
            .ok_or(Error::NoChannel)?;

        if channel.state() != ChannelState::Open || !state.queue.is_empty() {
            state.queue.push(frame);
            let sent = state.queue.flush(channel.as_ref());
            trace!(sent, queued = state.queue.len(), "Payload queued");
            return Ok(());
        }

        match channel.send(&frame) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(error = %e, "Direct send failed, queueing payload");
                state.queue.push(frame);
                Ok(())
            }
        }
    }

    /// Returns the live channel state, or `None` if no channel exists.
    #[must_use]
    pub fn status(&self) -> Option<ChannelState> {
        self.inner
            .state
            .lock()
            .live
            .as_ref()
            .map(|live| live.channel.state())
    }

    /// Returns the live channel.
    #[must_use]
    pub fn channel(&self) -> Option<Arc<dyn Channel>> {
        self.inner
            .state
            .lock()
            .live
            .as_ref()
            .map(|live| Arc::clone(&live.channel))
    }

    /// Returns the id of the live channel.
    #[must_use]
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.inner.state.lock().live.as_ref().map(|live| live.id)
    }

    /// Number of payloads waiting for the channel to open.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.inner.state.lock().queue.len()
    }

    /// Classifies a server status code and reports it to the user.
    ///
    /// Does nothing when the feedback mode is [`FeedbackMode::None`].
    /// The context's acknowledgement action is forwarded on modal feedback.
    /// Returns the category either way.
    pub fn classify_and_report(&self, status: u16, context: FeedbackContext) -> ErrorCategory {
        let category = ErrorCategory::from_status(status);
        let mode = self.feedback_mode();
        self.report(mode, category, context);
        category
    }

    /// Dispatches feedback unless `mode` suppresses it.
    fn report(&self, mode: FeedbackMode, category: ErrorCategory, context: FeedbackContext) {
        if let Some(presentation) = mode.presentation() {
            let feedback = Feedback::new(category, presentation)
                .with_details(context.details)
                .with_acknowledge(context.on_acknowledge);
            self.inner.dispatcher.dispatch(feedback);
        }
    }
}

// ============================================================================
// ConnectionManager - Lifecycle
// ============================================================================

impl<M> ConnectionManager<M>
where
    M: DeserializeOwned + Send + Sync + 'static,
{
    /// Replaces the live channel with a fresh one.
    ///
    /// Does nothing but log when the endpoint is invalid.
    ///
    /// # Errors
    ///
    /// Any error from the connector. The previous channel stays in that case.
    pub fn reconnect(&self) -> Result<()> {
        let endpoint = self.endpoint();
        if !is_socket_endpoint(&endpoint) {
            error!(%endpoint, "Cannot connect: the endpoint is invalid for a WebSocket");
            return Ok(());
        }
        self.init()
    }

    /// Closes the live channel.
    ///
    /// The resulting close event follows the usual path, including
    /// auto-reconnect when enabled.
    pub fn close(&self) {
        if let Some(channel) = self.channel() {
            channel.close();
        }
    }

    /// Constructs a channel for the stored configuration and makes it live.
    fn init(&self) -> Result<()> {
        let mut state = self.inner.state.lock();
        let request = ChannelRequest::new(
            state.config.endpoint.clone(),
            state.config.sub_protocols.clone(),
        );
        self.replace_channel(&mut state, &request)
    }

    /// Constructs a channel for `request` and makes it the live one.
    ///
    /// The previous channel is dropped only once the new one exists. Its
    /// events are stale from then on.
    fn replace_channel(&self, state: &mut State<M>, request: &ChannelRequest) -> Result<()> {
        let id = ChannelId::next();
        let channel = self
            .inner
            .connector
            .open(request, self.channel_handler(id))
            .inspect_err(|e| {
                debug!(endpoint = %request.endpoint, error = %e, "Channel construction failed");
            })?;

        debug!(channel_id = %id, endpoint = %request.endpoint, "Channel constructed");
        state.live = Some(LiveChannel { id, channel });
        Ok(())
    }

    /// Reconnects, logging instead of returning construction failures.
    fn init_or_log(&self) {
        if let Err(e) = self.init() {
            error!(endpoint = %self.endpoint(), error = %e, "Failed to construct channel");
        }
    }

    /// Builds the handler bound to channel `id`.
    ///
    /// Holds the manager weakly so a dropped manager tears its channel down.
    fn channel_handler(&self, id: ChannelId) -> ChannelHandler {
        let inner = Arc::downgrade(&self.inner);
        Arc::new(move |event: ChannelEvent| {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let manager = Self { inner };
            let name = event.name();
            if let Err(e) = manager.handle_event(id, event) {
                warn!(channel_id = %id, event = name, error = %e, "Channel event handler failed");
            }
        })
    }

    /// Schedules or performs a reconnect after a close.
    fn reconnect_after_loss(&self) {
        let (auto_reconnect, verbose, delay, endpoint) = {
            let state = self.inner.state.lock();
            (
                state.config.auto_reconnect,
                state.config.verbose,
                state.config.reconnect_delay,
                state.config.endpoint.clone(),
            )
        };

        if !auto_reconnect {
            return;
        }

        if verbose {
            info!(%endpoint, ?delay, "Reconnecting");
        }

        if delay.is_zero() {
            self.init_or_log();
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("No tokio runtime for a delayed reconnect, reconnecting now");
            self.init_or_log();
            return;
        };

        let expected = self.channel_id();
        let inner: Weak<Inner<M>> = Arc::downgrade(&self.inner);
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let manager = Self { inner };
            if manager.is_auto_reconnect() && manager.channel_id() == expected {
                manager.init_or_log();
            } else {
                debug!("Delayed reconnect skipped");
            }
        });
    }
}

// ============================================================================
// ConnectionManager - Event Handlers
// ============================================================================

impl<M> ConnectionManager<M>
where
    M: DeserializeOwned + Send + Sync + 'static,
{
    /// Routes one channel event.
    fn handle_event(&self, id: ChannelId, event: ChannelEvent) -> Result<()> {
        match &event {
            ChannelEvent::Message { text } => return self.on_message(id, text),
            ChannelEvent::Open => self.on_open(id, &event),
            ChannelEvent::Close { .. } => self.on_close(id, &event),
            ChannelEvent::Error { .. } => self.on_error(id, &event),
        }
        Ok(())
    }

    fn on_open(&self, id: ChannelId, event: &ChannelEvent) {
        let (verbose, callback) = {
            let state = self.inner.state.lock();
            if state.live(id).is_none() {
                trace!(channel_id = %id, "Stale open event ignored");
                return;
            }
            (state.config.verbose, state.callbacks.on_open.clone())
        };

        if verbose {
            info!(channel_id = %id, outcome = "success", "Connection established");
        }

        if let Some(callback) = callback {
            callback(None, Some(event), self);
        }

        let mut state = self.inner.state.lock();
        // The callback may have replaced the channel.
        let Some(channel) = state.live(id) else {
            return;
        };
        if channel.state() == ChannelState::Open {
            let sent = state.queue.flush(channel.as_ref());
            if sent > 0 {
                debug!(channel_id = %id, sent, remaining = state.queue.len(), "Queue flushed");
            }
        }
    }

    fn on_message(&self, id: ChannelId, text: &str) -> Result<()> {
        let (verbose, callback) = {
            let state = self.inner.state.lock();
            if state.live(id).is_none() {
                trace!(channel_id = %id, "Stale message event ignored");
                return Ok(());
            }
            (state.config.verbose, state.callbacks.on_message.clone())
        };

        let payload: M = serde_json::from_str(text)?;

        if verbose {
            info!(channel_id = %id, message = %text, "A message is received");
        }

        if let Some(callback) = callback {
            callback(Some(&payload), None, self);
        }

        Ok(())
    }

    fn on_close(&self, id: ChannelId, event: &ChannelEvent) {
        let (verbose, warn_on_loss, callback) = {
            let state = self.inner.state.lock();
            if state.live(id).is_none() {
                trace!(channel_id = %id, "Stale close event ignored");
                return;
            }
            (
                state.config.verbose,
                state.config.warn_on_loss,
                state.callbacks.on_close.clone(),
            )
        };

        if verbose && let ChannelEvent::Close { code, reason } = event {
            warn!(channel_id = %id, code, %reason, "Connection closed");
        }

        if warn_on_loss && let Some(callback) = callback {
            let context = match event {
                ChannelEvent::Close { reason, .. } => FeedbackContext::new().with_details(reason),
                _ => FeedbackContext::new(),
            };
            self.report(self.feedback_mode(), ErrorCategory::ConnectionLost, context);
            callback(None, Some(event), self);
        }

        self.reconnect_after_loss();
    }

    fn on_error(&self, id: ChannelId, event: &ChannelEvent) {
        let (channel, verbose, callback) = {
            let state = self.inner.state.lock();
            let Some(channel) = state.live(id) else {
                trace!(channel_id = %id, "Stale error event ignored");
                return;
            };
            (channel, state.config.verbose, state.callbacks.on_error.clone())
        };

        // Errors during teardown are expected.
        if channel.state().is_closing_or_closed() {
            return;
        }

        let message = match event {
            ChannelEvent::Error { message } => message.clone(),
            _ => String::new(),
        };

        if verbose {
            error!(channel_id = %id, error = %message, "Connection error");
        }

        if let Some(callback) = callback {
            callback(None, Some(event), self);
        }

        channel.close();

        let (mode, warn_on_loss) = {
            let state = self.inner.state.lock();
            (state.config.feedback_mode, state.config.warn_on_loss)
        };
        if warn_on_loss {
            self.report(
                mode,
                ErrorCategory::Generic,
                FeedbackContext::new().with_details(message),
            );
        }
    }
}

/// JSON kind name of a serialized value, used in [`Error::InvalidPayload`].
fn json_kind(frame: &str) -> &'static str {
    match frame.as_bytes().first() {
        Some(b'{') => "object",
        Some(b'[') => "array",
        Some(b'"') => "string",
        Some(b'n') => "null",
        Some(b't' | b'f') => "boolean",
        _ => "number",
    }
}

// ============================================================================
// ManagerBuilder
// ============================================================================

/// Builder for a [`ConnectionManager`].
///
/// Defaults to [`WsConnector`] and [`TracingDispatcher`].
pub struct ManagerBuilder<M = Value> {
    config: ConnectionConfig,
    callbacks: Callbacks<M>,
    connector: Option<Arc<dyn Connector>>,
    dispatcher: Option<Arc<dyn FeedbackDispatcher>>,
}

impl<M> Default for ManagerBuilder<M> {
    fn default() -> Self {
        Self {
            config: ConnectionConfig::default(),
            callbacks: Callbacks::default(),
            connector: None,
            dispatcher: None,
        }
    }
}

impl<M> ManagerBuilder<M>
where
    M: DeserializeOwned + Send + Sync + 'static,
{
    /// Creates a builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[inline]
    #[must_use]
    pub fn config(mut self, config: ConnectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the channel connector.
    #[inline]
    #[must_use]
    pub fn connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Sets the feedback dispatcher.
    #[inline]
    #[must_use]
    pub fn dispatcher(mut self, dispatcher: Arc<dyn FeedbackDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Sets the open callback.
    #[must_use]
    pub fn on_open<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &ConnectionManager<M>) + Send + Sync + 'static,
    {
        self.callbacks.on_open = Some(Arc::new(callback));
        self
    }

    /// Sets the message callback.
    #[must_use]
    pub fn on_message<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &ConnectionManager<M>) + Send + Sync + 'static,
    {
        self.callbacks.on_message = Some(Arc::new(callback));
        self
    }

    /// Sets the close callback.
    #[must_use]
    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &ConnectionManager<M>) + Send + Sync + 'static,
    {
        self.callbacks.on_close = Some(Arc::new(callback));
        self
    }

    /// Sets the error callback.
    #[must_use]
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&M>, Option<&ChannelEvent>, &ConnectionManager<M>) + Send + Sync + 'static,
    {
        self.callbacks.on_error = Some(Arc::new(callback));
        self
    }

    /// Builds the manager and starts connecting when the endpoint is valid.
    ///
    /// Never fails: an invalid endpoint is logged and leaves the manager
    /// waiting for [`ConnectionManager::set_endpoint`].
    #[must_use]
    pub fn build(self) -> ConnectionManager<M> {
        let connector = self
            .connector
            .unwrap_or_else(|| Arc::new(WsConnector::new()));
        let dispatcher = self
            .dispatcher
            .unwrap_or_else(|| Arc::new(TracingDispatcher));

        ConnectionManager::from_parts(self.config, self.callbacks, connector, dispatcher)
    }
}

// ============================================================================
// Tests
// ============================================================================
