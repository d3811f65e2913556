//! One-shot timer adapter over `gloo_timers::callback::Timeout`.

use gloo_timers::callback::Timeout;

use counsel_core::ports::{DelayHandle, SchedulerPort};

/// Scheduler backed by the browser's `setTimeout`
pub struct BrowserScheduler;

impl BrowserScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerPort for BrowserScheduler {
    fn delay(&self, delay_ms: u32, f: Box<dyn FnOnce()>) -> Box<dyn DelayHandle> {
        let timeout = Timeout::new(delay_ms, move || f());
        Box::new(BrowserDelay {
            timeout: Some(timeout),
        })
    }
}

struct BrowserDelay {
    timeout: Option<Timeout>,
}

impl DelayHandle for BrowserDelay {
    fn cancel(mut self: Box<Self>) {
        if let Some(timeout) = self.timeout.take() {
            timeout.cancel();
        }
    }
}

impl Drop for BrowserDelay {
    fn drop(&mut self) {
        // Dropping without cancel leaves the timer armed; the port
        // contract says only an explicit cancel stops it.
        if let Some(timeout) = self.timeout.take() {
            timeout.forget();
        }
    }
}
