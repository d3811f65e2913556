//! Browser adapters for the counsel-core ports.
//!
//! Everything here touches wasm-bindgen and only works on
//! wasm32-unknown-unknown inside a browser.

pub mod auth;
pub mod socket;
pub mod timers;

pub use auth::RestAuth;
pub use socket::BrowserSocket;
pub use timers::BrowserScheduler;
