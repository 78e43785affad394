//! Message list component
//!
//! Displays the conversation history as chat bubbles with a typing
//! indicator while a request is pending.

use crate::messages::{Message, Sender};
use crate::session::SessionController;
use crate::ui::theme::Theme;
use egui::{self, Align, Layout, RichText};

/// Message list component
pub struct MessageList<'a> {
    controller: &'a SessionController,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(controller: &'a SessionController, theme: &'a Theme) -> Self {
        Self { controller, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let messages = self.controller.state().messages().get_all();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    for message in &messages {
                        self.show_message(ui, message);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    if self.controller.pending() {
                        self.show_typing_indicator(ui);
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = message.sender == Sender::User;
        let (fill, layout) = if is_user {
            (self.theme.user_bubble, Layout::right_to_left(Align::TOP))
        } else {
            (self.theme.assistant_bubble, Layout::left_to_right(Align::TOP))
        };

        ui.with_layout(layout, |ui| {
            let max_width = ui.available_width() * 0.75;
            egui::Frame::none()
                .fill(fill)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm + 4.0)
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.vertical(|ui| {
                        let label = ui.label(
                            RichText::new(&message.text)
                                .size(14.0)
                                .color(self.theme.text_primary),
                        );

                        let role = if is_user { "User message" } else { "Assistant response" };
                        let info = format!("{}: {}", role, message.text);
                        label.widget_info(|| {
                            egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &info)
                        });

                        ui.horizontal(|ui| {
                            if message.metadata.is_voice {
                                ui.label(
                                    RichText::new("voice")
                                        .size(10.0)
                                        .color(self.theme.primary),
                                );
                            }
                            ui.label(
                                RichText::new(message.timestamp.format("%H:%M").to_string())
                                    .size(10.0)
                                    .color(self.theme.text_muted),
                            );
                        });
                    });
                });
        });
    }

    fn show_typing_indicator(&self, ui: &mut egui::Ui) {
        ui.with_layout(Layout::left_to_right(Align::TOP), |ui| {
            egui::Frame::none()
                .fill(self.theme.assistant_bubble)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm + 4.0)
                .show(ui, |ui| {
                    let t = ui.ctx().input(|i| i.time);
                    let dots = ".".repeat((t * 2.0) as usize % 3 + 1);
                    ui.label(
                        RichText::new(dots)
                            .size(16.0)
                            .color(self.theme.text_muted),
                    );
                    ui.ctx().request_repaint();
                });
        });
    }
}
