//! Chat panel — transcript, connection banner, quick actions, input row.

use egui::{self, Align, Color32, Layout, RichText, ScrollArea, Vec2};

use counsel_core::connection::ConnectionState;
use counsel_types::message::{ChatMessage, MessageKind};

use crate::state::UiState;
use crate::theme::*;

/// What the user asked the chat client to do this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    Clear,
    Reconnect,
}

/// Render the chat panel. Returns Some(action) when the user acted.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    messages: &[ChatMessage],
    connection: &ConnectionState,
    error: Option<&str>,
) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new("Legal Assistant")
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = match connection {
                            ConnectionState::Open => SUCCESS,
                            ConnectionState::Connecting => WARNING,
                            _ => ERROR,
                        };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                        if ui
                            .small_button(RichText::new("Clear").color(TEXT_SECONDARY))
                            .clicked()
                        {
                            action = Some(ChatAction::Clear);
                        }
                    });
                });

                ui.separator();

                // Connection banner
                if let Some(error) = error {
                    egui::Frame::default()
                        .fill(BANNER_BG)
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(error).color(ERROR));
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    if ui
                                        .button(RichText::new("Reconnect").color(TEXT_PRIMARY))
                                        .clicked()
                                    {
                                        action = Some(ChatAction::Reconnect);
                                    }
                                });
                            });
                        });
                    ui.add_space(4.0);
                }

                // Transcript
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in messages {
                            render_message(ui, message, &mut action);
                            ui.add_space(4.0);
                        }
                        if state.scroll_to_bottom {
                            state.scroll_to_bottom = false;
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Ask a legal question...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    if (response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && !state.input_text.trim().is_empty())
                        || send_btn.clicked()
                    {
                        let text = state.input_text.trim().to_string();
                        action = Some(ChatAction::Send(text));
                        state.input_text.clear();
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage, action: &mut Option<ChatAction>) {
    let error_bg = Color32::from_rgb(50, 20, 20);
    let (label, label_color, bg) = match message.kind {
        MessageKind::User => ("You", ACCENT, BG_SECONDARY),
        MessageKind::Assistant => ("Assistant", SUCCESS, BG_SECONDARY),
        MessageKind::System => ("Notice", TEXT_SECONDARY, BG_SURFACE),
        MessageKind::Error => ("Error", ERROR, error_bg),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).color(label_color).strong().small());
            ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));

            // Suggested follow-ups; clicking one submits its title.
            if !message.quick_actions.is_empty() {
                ui.add_space(2.0);
                ui.horizontal_wrapped(|ui| {
                    for quick in &message.quick_actions {
                        let button = egui::Button::new(
                            RichText::new(&quick.title).color(TEXT_PRIMARY).small(),
                        )
                        .fill(BG_SURFACE)
                        .corner_radius(PANEL_ROUNDING);
                        if ui
                            .add(button)
                            .on_hover_text(&quick.description)
                            .clicked()
                        {
                            *action = Some(ChatAction::Send(quick.title.clone()));
                        }
                    }
                });
            }
        });
}
