//! Chat connection manager — the core socket lifecycle controller.
//!
//! Owns exactly one logical session to the assistant backend:
//! 1. Resolve an effective user identity (explicit → authenticated → guest)
//! 2. Open a socket to `<ws_base>/ws/chat/<id>` after a debounced first connect
//! 3. Append inbound frames to an in-memory ordered transcript
//! 4. On abnormal closure, retry with exponential backoff up to a cap
//! 5. Expose derived read state (`is_connected`, error text) to the UI
//!
//! All failures are absorbed here and surfaced as plain state; nothing
//! crosses this boundary as a panic.

use std::cell::RefCell;
use std::rc::Rc;

use counsel_types::config::ChatConfig;
use counsel_types::event::ChatEvent;
use counsel_types::identity::resolve_user_id;
use counsel_types::message::{now_ms, ChatMessage};
use counsel_types::wire::{ClientFrame, ServerFrame};

use crate::event_bus::EventBus;
use crate::ports::{
    AuthPort, DelayHandle, SchedulerPort, SocketEvent, SocketEventSink, SocketHandle, SocketPort,
};
use crate::retry::{
    backoff_delay_ms, INITIAL_CONNECT_DELAY_MS, MANUAL_RECONNECT_DELAY_MS, RETRY_CAP,
};

// ─── Close codes ─────────────────────────────────────────────

pub const CLOSE_NORMAL: u16 = 1000;
pub const CLOSE_GOING_AWAY: u16 = 1001;
pub const CLOSE_ABNORMAL: u16 = 1006;
pub const CLOSE_SERVER_ERROR: u16 = 1011;
pub const CLOSE_SERVICE_RESTART: u16 = 1012;

/// Human-readable description of an abnormal close code
pub fn close_reason_message(code: u16) -> String {
    match code {
        CLOSE_GOING_AWAY => "Connection lost while navigating away.".to_string(),
        CLOSE_ABNORMAL => "Connection to the assistant was lost.".to_string(),
        CLOSE_SERVER_ERROR => "The assistant hit an internal error.".to_string(),
        CLOSE_SERVICE_RESTART => "The assistant is restarting.".to_string(),
        other => format!("Connection error (code {other})."),
    }
}

/// Terminal message once the retry cap is exhausted
pub const RETRIES_EXHAUSTED_MESSAGE: &str =
    "Unable to reach the assistant. Please refresh the page to try again.";
/// Transcript entry appended when a send is rejected offline
pub const SEND_OFFLINE_LOG_MESSAGE: &str =
    "Your message could not be sent. You are not connected to the assistant.";
/// Error text surfaced when a send is rejected offline
pub const SEND_OFFLINE_ERROR: &str = "Not connected. Message was not sent.";
/// Fallback when a transport error carries no message of its own
pub const GENERIC_TRANSPORT_ERROR: &str = "Connection error occurred.";

const MANUAL_RECONNECT_REASON: &str = "manual reconnect";
const SHUTDOWN_REASON: &str = "client shutdown";

// ─── Connection state ────────────────────────────────────────

/// Lifecycle of the single logical connection.
/// `Closed` is held only while an automatic retry is pending; a normal
/// closure or an exhausted retry cap rests in `Idle` until the user asks
/// for a reconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Open,
    Closed { code: u16, reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }
}

// ─── Client ──────────────────────────────────────────────────

struct Inner {
    state: ConnectionState,
    messages: Vec<ChatMessage>,
    retry_count: u32,
    last_error: Option<String>,
    /// Resolved once per client and reused for every reconnect
    effective_user_id: Option<String>,
    socket: Option<Box<dyn SocketHandle>>,
    /// Bumped for every fresh socket; events carrying an older value
    /// belong to a superseded socket and are discarded.
    socket_generation: u64,
    pending_delay: Option<Box<dyn DelayHandle>>,
    started: bool,
}

/// Follow-up work decided under the state borrow, executed after it
enum After {
    Nothing,
    ScheduleRetry { delay_ms: u32 },
}

/// The chat connection manager. Clone-cheap; all clones share one session.
#[derive(Clone)]
pub struct ChatClient {
    inner: Rc<RefCell<Inner>>,
    config: Rc<ChatConfig>,
    sockets: Rc<dyn SocketPort>,
    scheduler: Rc<dyn SchedulerPort>,
    auth: Rc<dyn AuthPort>,
    bus: EventBus,
}

impl ChatClient {
    pub fn new(
        config: ChatConfig,
        sockets: Rc<dyn SocketPort>,
        scheduler: Rc<dyn SchedulerPort>,
        auth: Rc<dyn AuthPort>,
        bus: EventBus,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: ConnectionState::Idle,
                messages: Vec::new(),
                retry_count: 0,
                last_error: None,
                effective_user_id: None,
                socket: None,
                socket_generation: 0,
                pending_delay: None,
                started: false,
            })),
            config: Rc::new(config),
            sockets,
            scheduler,
            auth,
            bus,
        }
    }

    // ─── Read state ──────────────────────────────────────────

    /// Snapshot of the transcript, ordered by insertion
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.borrow().messages.clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.inner.borrow().state.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.borrow().state.is_connected()
    }

    pub fn is_connecting(&self) -> bool {
        self.inner.borrow().state.is_connecting()
    }

    /// Last surfaced human-readable error, if any
    pub fn connection_error(&self) -> Option<String> {
        self.inner.borrow().last_error.clone()
    }

    // ─── Lifecycle ───────────────────────────────────────────

    /// Schedule the one debounced initial connect. Safe to call on every
    /// frame; only the first call does anything.
    pub fn start(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.started {
                return;
            }
            inner.started = true;
        }
        log::info!(
            "chat client started, first connect in {}ms",
            INITIAL_CONNECT_DELAY_MS
        );
        self.schedule_connect(INITIAL_CONNECT_DELAY_MS);
    }

    /// Open a connection now. No-op while one is already open or in flight.
    pub fn connect(&self) {
        let (url, generation) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_connected() || inner.state.is_connecting() {
                return;
            }
            inner.socket_generation += 1;
            inner.state = ConnectionState::Connecting;
            inner.last_error = None;
            let user_id = match &inner.effective_user_id {
                Some(id) => id.clone(),
                None => {
                    let id = resolve_user_id(
                        self.config.user_id.as_deref(),
                        self.auth.user_id().as_deref(),
                    );
                    inner.effective_user_id = Some(id.clone());
                    id
                }
            };
            (self.config.endpoint(&user_id), inner.socket_generation)
        };

        self.bus.emit(ChatEvent::Connecting);
        self.bus.emit(ChatEvent::ErrorChanged(None));
        log::debug!("opening chat socket: {url}");

        let client = self.clone();
        let sink: SocketEventSink = Rc::new(move |event| {
            client.handle_socket_event(generation, event);
        });

        match self.sockets.connect(&url, sink) {
            Ok(handle) => {
                self.inner.borrow_mut().socket = Some(handle);
            }
            Err(e) => {
                log::warn!("chat socket open failed: {e}");
                // Route through the close path so backoff applies.
                self.handle_socket_event(
                    generation,
                    SocketEvent::Closed {
                        code: CLOSE_ABNORMAL,
                        reason: e.to_string(),
                    },
                );
            }
        }
    }

    /// User-initiated reconnect: reset backoff, drop the current socket,
    /// and open a fresh connection after a short fixed delay.
    pub fn reconnect(&self) {
        log::info!("manual reconnect requested");
        {
            let mut inner = self.inner.borrow_mut();
            inner.retry_count = 0;
            inner.last_error = None;
            if let Some(delay) = inner.pending_delay.take() {
                delay.cancel();
            }
            // Stale-ify any in-flight socket before closing it.
            inner.socket_generation += 1;
            if let Some(socket) = inner.socket.take() {
                socket.close(CLOSE_NORMAL, MANUAL_RECONNECT_REASON);
            }
            inner.state = ConnectionState::Idle;
        }
        self.bus.emit(ChatEvent::ErrorChanged(None));
        self.schedule_connect(MANUAL_RECONNECT_DELAY_MS);
    }

    /// Tear down: cancel pending timers and close the socket normally so
    /// no further callbacks or retries fire.
    pub fn shutdown(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(delay) = inner.pending_delay.take() {
            delay.cancel();
        }
        inner.socket_generation += 1;
        if let Some(socket) = inner.socket.take() {
            socket.close(CLOSE_NORMAL, SHUTDOWN_REASON);
        }
        inner.state = ConnectionState::Idle;
    }

    // ─── Operations ──────────────────────────────────────────

    /// Send a user message. Fire-and-forget: failures surface as transcript
    /// entries and error text, never as a panic or returned error.
    pub fn send_message(&self, text: &str) {
        let mut inner = self.inner.borrow_mut();

        if !inner.state.is_connected() {
            let entry = ChatMessage::error_text(SEND_OFFLINE_LOG_MESSAGE);
            inner.messages.push(entry.clone());
            inner.last_error = Some(SEND_OFFLINE_ERROR.to_string());
            self.bus.emit(ChatEvent::MessageAppended(entry));
            self.bus
                .emit(ChatEvent::ErrorChanged(inner.last_error.clone()));
            return;
        }

        // Optimistic local echo, appended before the network write so it
        // always precedes the server's reply in the transcript.
        let echo = ChatMessage::user(text);
        inner.messages.push(echo.clone());
        inner.last_error = None;
        self.bus.emit(ChatEvent::MessageAppended(echo));
        self.bus.emit(ChatEvent::ErrorChanged(None));

        let payload = match serde_json::to_string(&ClientFrame::user(text)) {
            Ok(p) => p,
            Err(e) => {
                log::error!("failed to encode outbound frame: {e}");
                return;
            }
        };
        if let Some(socket) = &inner.socket {
            if let Err(e) = socket.send_text(&payload) {
                log::warn!("chat send failed: {e}");
                inner.last_error = Some(format!("Failed to send message: {e}"));
                self.bus
                    .emit(ChatEvent::ErrorChanged(inner.last_error.clone()));
            }
        }
    }

    /// Empty the transcript. Connection state is untouched.
    pub fn clear_messages(&self) {
        self.inner.borrow_mut().messages.clear();
        self.bus.emit(ChatEvent::LogCleared);
    }

    // ─── Socket event handling ───────────────────────────────

    fn handle_socket_event(&self, generation: u64, event: SocketEvent) {
        let after = {
            let mut inner = self.inner.borrow_mut();
            if generation != inner.socket_generation {
                log::debug!("discarding event from superseded socket");
                return;
            }
            match event {
                SocketEvent::Opened => self.on_opened(&mut inner),
                SocketEvent::Frame(text) => self.on_frame(&mut inner, &text),
                SocketEvent::Closed { code, reason } => self.on_closed(&mut inner, code, reason),
                SocketEvent::TransportError { message } => {
                    self.on_transport_error(&mut inner, message)
                }
            }
        };

        if let After::ScheduleRetry { delay_ms } = after {
            self.schedule_connect(delay_ms);
        }
    }

    fn on_opened(&self, inner: &mut Inner) -> After {
        log::info!("chat socket open");
        inner.state = ConnectionState::Open;
        inner.retry_count = 0;
        inner.last_error = None;
        self.bus.emit(ChatEvent::Connected);
        self.bus.emit(ChatEvent::ErrorChanged(None));
        After::Nothing
    }

    fn on_frame(&self, inner: &mut Inner, text: &str) -> After {
        match serde_json::from_str::<ServerFrame>(text) {
            Ok(frame) => {
                let message = frame.into_message(now_ms());
                inner.messages.push(message.clone());
                self.bus.emit(ChatEvent::MessageAppended(message));
            }
            // One bad frame must not interrupt the session; drop it.
            Err(e) => log::warn!("dropping malformed chat frame: {e}"),
        }
        After::Nothing
    }

    fn on_closed(&self, inner: &mut Inner, code: u16, reason: String) -> After {
        inner.socket = None;
        inner.state = ConnectionState::Closed {
            code,
            reason: reason.clone(),
        };
        self.bus.emit(ChatEvent::Disconnected { code, reason });

        if code == CLOSE_NORMAL {
            log::info!("chat socket closed normally");
            inner.state = ConnectionState::Idle;
            return After::Nothing;
        }

        if inner.retry_count >= RETRY_CAP {
            log::warn!("retry cap reached, giving up");
            inner.last_error = Some(RETRIES_EXHAUSTED_MESSAGE.to_string());
            self.bus
                .emit(ChatEvent::ErrorChanged(inner.last_error.clone()));
            inner.state = ConnectionState::Idle;
            return After::Nothing;
        }

        let delay_ms = backoff_delay_ms(inner.retry_count);
        inner.retry_count += 1;
        inner.last_error = Some(format!(
            "{} Reconnecting (attempt {}/{})",
            close_reason_message(code),
            inner.retry_count,
            RETRY_CAP
        ));
        log::info!(
            "chat socket closed (code {code}), retry {}/{} in {delay_ms}ms",
            inner.retry_count,
            RETRY_CAP
        );
        self.bus
            .emit(ChatEvent::ErrorChanged(inner.last_error.clone()));
        self.bus.emit(ChatEvent::RetryScheduled {
            attempt: inner.retry_count,
            max: RETRY_CAP,
            delay_ms,
        });
        After::ScheduleRetry { delay_ms }
    }

    fn on_transport_error(&self, inner: &mut Inner, message: Option<String>) -> After {
        let text = message.unwrap_or_else(|| GENERIC_TRANSPORT_ERROR.to_string());
        log::warn!("chat socket transport error: {text}");
        inner.last_error = Some(text);
        self.bus
            .emit(ChatEvent::ErrorChanged(inner.last_error.clone()));
        // The close event that follows carries the definitive code and
        // drives retry scheduling; here we only leave the open states.
        if inner.state.is_connected() || inner.state.is_connecting() {
            inner.state = ConnectionState::Closed {
                code: CLOSE_ABNORMAL,
                reason: "transport error".to_string(),
            };
        }
        After::Nothing
    }

    // ─── Timers ──────────────────────────────────────────────

    fn schedule_connect(&self, delay_ms: u32) {
        let client = self.clone();
        let handle = self.scheduler.delay(
            delay_ms,
            Box::new(move || {
                client.inner.borrow_mut().pending_delay = None;
                client.connect();
            }),
        );
        self.inner.borrow_mut().pending_delay = Some(handle);
    }
}
