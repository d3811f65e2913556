//! Main egui application — hosts the chat widget and owns the client.

use std::rc::Rc;
use std::time::Duration;

use egui::CentralPanel;

use counsel_core::connection::ChatClient;
use counsel_core::event_bus::EventBus;
use counsel_platform::{BrowserScheduler, BrowserSocket, RestAuth};
use counsel_types::config::ChatConfig;
use counsel_ui::panels::chat::{chat_panel, ChatAction};
use counsel_ui::state::UiState;
use counsel_ui::theme;

/// The main application state
pub struct CounselApp {
    client: ChatClient,
    bus: EventBus,
    ui_state: UiState,
    first_frame: bool,
}

impl CounselApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        theme::apply_theme(&cc.egui_ctx);

        // Deployment overrides are baked in at build time; absent that,
        // the documented local-development fallback applies.
        let mut config = ChatConfig::default();
        if let Some(ws_base) = option_env!("COUNSEL_WS_BASE") {
            config.ws_base = ws_base.to_string();
        }
        if let Some(api_base) = option_env!("COUNSEL_API_BASE") {
            config.api_base = api_base.to_string();
        }

        let bus = EventBus::new();
        let auth = Rc::new(RestAuth::new(&config.api_base));
        let client = ChatClient::new(
            config,
            Rc::new(BrowserSocket::new()),
            Rc::new(BrowserScheduler::new()),
            auth,
            bus.clone(),
        );

        Self {
            client,
            bus,
            ui_state: UiState::new(),
            first_frame: true,
        }
    }
}

impl eframe::App for CounselApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            self.first_frame = false;
            // Debounced initial connect; guarded so re-renders cannot
            // trigger a second one.
            self.client.start();
        }

        if self.bus.has_pending() {
            self.ui_state.process_events(self.bus.drain());
            ctx.request_repaint();
        }

        let messages = self.client.messages();
        let connection = self.client.connection_state();
        let error = self.client.connection_error();

        CentralPanel::default().show(ctx, |ui| {
            if let Some(action) = chat_panel(
                ui,
                &mut self.ui_state,
                &messages,
                &connection,
                error.as_deref(),
            ) {
                match action {
                    ChatAction::Send(text) => self.client.send_message(&text),
                    ChatAction::Clear => self.client.clear_messages(),
                    ChatAction::Reconnect => self.client.reconnect(),
                }
            }
        });

        // Timers and socket events arrive between frames; poll for them.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl Drop for CounselApp {
    fn drop(&mut self) {
        // Page teardown: stop pending retries and close the socket cleanly.
        self.client.shutdown();
    }
}
