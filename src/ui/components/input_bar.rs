//! Input bar component
//!
//! Text input plus Send button. Send affordances are disabled while a
//! request is pending, enforcing the single in-flight invariant at the
//! surface.

use crate::session::SessionController;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText};

/// Input bar component
pub struct InputBar<'a> {
    controller: &'a mut SessionController,
    input_text: &'a mut String,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(
        controller: &'a mut SessionController,
        input_text: &'a mut String,
        theme: &'a Theme,
    ) -> Self {
        Self {
            controller,
            input_text,
            theme,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let pending = self.controller.pending();

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let available_width = ui.available_width() - 70.0;

                    let text_edit = egui::TextEdit::singleline(&mut *self.input_text)
                        .hint_text("Ask a question about your notes...")
                        .desired_width(available_width)
                        .font(egui::TextStyle::Body);

                    let text_response = ui.add_enabled(!pending, text_edit);
                    text_response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Message input")
                    });

                    let submitted = text_response.lost_focus()
                        && ui.input(|i| i.key_pressed(Key::Enter));

                    ui.add_space(self.theme.spacing_sm);

                    let send_enabled = !pending && !self.input_text.trim().is_empty();
                    let send_button = egui::Button::new(
                        RichText::new("Send").color(self.theme.text_primary),
                    )
                    .fill(self.theme.primary)
                    .rounding(self.theme.button_rounding);

                    let send_response = ui.add_enabled(send_enabled, send_button);
                    send_response.widget_info(|| {
                        egui::WidgetInfo::labeled(
                            egui::WidgetType::Button,
                            send_enabled,
                            "Send message",
                        )
                    });

                    if (send_response.clicked() || submitted) && send_enabled {
                        self.controller.send_typed(&self.input_text.clone());
                        self.input_text.clear();
                        text_response.request_focus();
                    }
                });
            });
    }
}
