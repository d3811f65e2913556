//! WebSocket adapter — bridges the browser socket to the core's ports.
//!
//! Each connect wires `onopen`/`onmessage`/`onerror`/`onclose` closures
//! into the core's event sink. The returned handle owns the closures;
//! dropping it detaches every callback so nothing fires against a
//! torn-down client.

use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use counsel_core::ports::{SocketEvent, SocketEventSink, SocketHandle, SocketPort};
use counsel_types::{ChatError, Result};

/// Socket adapter backed by `web_sys::WebSocket`
pub struct BrowserSocket;

impl BrowserSocket {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserSocket {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketPort for BrowserSocket {
    fn connect(&self, url: &str, sink: SocketEventSink) -> Result<Box<dyn SocketHandle>> {
        let ws = WebSocket::new(url)
            .map_err(|e| ChatError::Socket(format!("WebSocket::new failed: {e:?}")))?;

        let s = sink.clone();
        let onopen = Closure::wrap(Box::new(move |_event: Event| {
            s(SocketEvent::Opened);
        }) as Box<dyn FnMut(Event)>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let s = sink.clone();
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            // Only text frames carry chat traffic.
            if let Some(text) = event.data().as_string() {
                s(SocketEvent::Frame(text));
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let s = sink.clone();
        let onerror = Closure::wrap(Box::new(move |event: JsValue| {
            // Browsers fire a bare Event here; a message field is optional.
            let message = Reflect::get(&event, &JsValue::from_str("message"))
                .ok()
                .and_then(|v| v.as_string())
                .filter(|m| !m.is_empty());
            s(SocketEvent::TransportError { message });
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let s = sink;
        let onclose = Closure::wrap(Box::new(move |event: CloseEvent| {
            s(SocketEvent::Closed {
                code: event.code(),
                reason: event.reason(),
            });
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        Ok(Box::new(BrowserSocketHandle {
            ws,
            _onopen: onopen,
            _onmessage: onmessage,
            _onerror: onerror,
            _onclose: onclose,
        }))
    }
}

/// Keeps the socket and its callback closures alive together
struct BrowserSocketHandle {
    ws: WebSocket,
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onerror: Closure<dyn FnMut(JsValue)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
}

impl SocketHandle for BrowserSocketHandle {
    fn send_text(&self, payload: &str) -> Result<()> {
        self.ws
            .send_with_str(payload)
            .map_err(|e| ChatError::Socket(format!("send failed: {e:?}")))
    }

    fn close(&self, code: u16, reason: &str) {
        if let Err(e) = self.ws.close_with_code_and_reason(code, reason) {
            log::warn!("websocket close failed: {e:?}");
        }
    }
}

impl Drop for BrowserSocketHandle {
    fn drop(&mut self) {
        // Detach callbacks before the closures are dropped so the browser
        // never invokes a freed closure.
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onerror(None);
        self.ws.set_onclose(None);
    }
}
