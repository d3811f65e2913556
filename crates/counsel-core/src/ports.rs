//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `counsel-core` (pure Rust).
//! Implementations live in `counsel-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.
//!
//! Everything is single-threaded: the browser runtime has no parallelism,
//! so ports hand events back through plain `Rc` callbacks rather than
//! channels or Send futures.

use std::rc::Rc;

use counsel_types::Result;

// ─── Socket Port ─────────────────────────────────────────────

/// Lifecycle event of one underlying socket
#[derive(Debug, Clone)]
pub enum SocketEvent {
    /// The socket finished its handshake and is ready to send
    Opened,
    /// One complete inbound text frame
    Frame(String),
    /// The socket closed, normally or not
    Closed { code: u16, reason: String },
    /// A transport-level error fired. The close event that follows
    /// carries the definitive close code.
    TransportError { message: Option<String> },
}

/// Callback through which an adapter delivers socket events
pub type SocketEventSink = Rc<dyn Fn(SocketEvent)>;

/// Opens sockets. One call, one socket.
pub trait SocketPort {
    /// Open a socket to `url` and deliver its events through `sink`.
    /// Returns a handle owning the socket; dropping the handle detaches
    /// all callbacks so nothing fires against torn-down state.
    fn connect(&self, url: &str, sink: SocketEventSink) -> Result<Box<dyn SocketHandle>>;
}

/// Handle to one open (or opening) socket
pub trait SocketHandle {
    /// Queue one text frame for transmission
    fn send_text(&self, payload: &str) -> Result<()>;

    /// Close with the given code and reason. Safe to call at any stage.
    fn close(&self, code: u16, reason: &str);
}

// ─── Scheduler Port ──────────────────────────────────────────

/// One-shot timers for retry backoff and connect debouncing
pub trait SchedulerPort {
    /// Run `f` once after `delay_ms`. The returned handle cancels the
    /// timer explicitly; merely dropping the handle leaves it running.
    fn delay(&self, delay_ms: u32, f: Box<dyn FnOnce()>) -> Box<dyn DelayHandle>;
}

/// Handle to a pending delay
pub trait DelayHandle {
    /// Cancel the timer; the callback will not run
    fn cancel(self: Box<Self>);
}

// ─── Auth Port ───────────────────────────────────────────────

/// Synchronous view of the marketplace's authenticated account, if any.
/// Adapters resolve this in the background; callers read whatever has
/// arrived by the time they ask.
pub trait AuthPort {
    fn user_id(&self) -> Option<String>;
}
