//! Event bus between the connection manager and the UI.
//!
//! Single-threaded (WASM constraint), interior mutability via RefCell.
//! The manager pushes events as socket callbacks and timers fire; the UI
//! drains the queue once per frame and projects it into render state.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use counsel_types::event::ChatEvent;

/// Shared event queue — clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Publish an event. Called by the chat client.
    pub fn emit(&self, event: ChatEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Take every pending event, in emission order. Called by the UI
    /// layer each frame.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Whether anything is queued (used to decide egui repaints).
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
