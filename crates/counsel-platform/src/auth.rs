//! REST identity probe.
//!
//! The chat endpoint embeds a user id; when the visitor is signed in to
//! the marketplace the account id should be used. The probe fetches the
//! current profile in the background and the client reads whatever has
//! resolved by the time it first connects (the initial-connect debounce
//! gives it a generous head start). A failed probe just means guest mode.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use serde::Deserialize;

use counsel_core::ports::AuthPort;

#[derive(Debug, Deserialize)]
struct AuthProfile {
    id: String,
}

/// Auth adapter that resolves `<api_base>/api/auth/me` in the background
pub struct RestAuth {
    resolved: Rc<RefCell<Option<String>>>,
}

impl RestAuth {
    pub fn new(api_base: &str) -> Self {
        let resolved: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let slot = resolved.clone();
        let url = format!("{}/api/auth/me", api_base.trim_end_matches('/'));

        wasm_bindgen_futures::spawn_local(async move {
            match Request::get(&url).send().await {
                Ok(response) if response.ok() => match response.json::<AuthProfile>().await {
                    Ok(profile) => {
                        log::info!("authenticated session resolved");
                        *slot.borrow_mut() = Some(profile.id);
                    }
                    Err(e) => log::debug!("auth probe returned an unreadable profile: {e}"),
                },
                Ok(response) => {
                    log::debug!("auth probe: HTTP {}, continuing as guest", response.status())
                }
                Err(e) => log::debug!("auth probe failed ({e}), continuing as guest"),
            }
        });

        Self { resolved }
    }
}

impl AuthPort for RestAuth {
    fn user_id(&self) -> Option<String> {
        self.resolved.borrow().clone()
    }
}
