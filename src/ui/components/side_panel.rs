//! Side panel component
//!
//! Upload card, voice mode controls, and the Test Me quiz button.

use crate::session::{Notification, SessionController};
use crate::speech::CaptureControls;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};
use tracing::warn;

/// Side panel component
pub struct SidePanelContent<'a> {
    controller: &'a mut SessionController,
    capture: &'a CaptureControls,
    voice_mode: &'a mut bool,
    theme: &'a Theme,
    notifications: &'a mut Vec<Notification>,
}

impl<'a> SidePanelContent<'a> {
    pub fn new(
        controller: &'a mut SessionController,
        capture: &'a CaptureControls,
        voice_mode: &'a mut bool,
        theme: &'a Theme,
        notifications: &'a mut Vec<Notification>,
    ) -> Self {
        Self {
            controller,
            capture,
            voice_mode,
            theme,
            notifications,
        }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.add_space(self.theme.spacing);

            ui.label(
                RichText::new("StudySphere")
                    .size(22.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new("Your Conversational AI Study Partner")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(self.theme.spacing_lg);
            self.show_upload_card(ui);

            ui.add_space(self.theme.spacing);
            self.show_voice_controls(ui);

            ui.add_space(self.theme.spacing);
            self.show_quiz_button(ui);
        });

        self.handle_dropped_files(ui.ctx());
    }

    fn show_upload_card(&mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new("Upload Study Materials")
                            .size(14.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Drop a PDF of your notes here to get started")
                            .size(12.0)
                            .color(self.theme.text_muted),
                    );

                    if let Some(name) = self.controller.state().selected_file() {
                        ui.add_space(self.theme.spacing_sm);
                        ui.label(
                            RichText::new(format!("📄 {name}"))
                                .size(12.0)
                                .color(self.theme.success),
                        );
                    }
                });
            });
    }

    fn show_voice_controls(&mut self, ui: &mut egui::Ui) {
        let supported = self.capture.is_supported();

        if !*self.voice_mode {
            let button = egui::Button::new(
                RichText::new("🎤 Voice Mode").color(self.theme.text_primary),
            )
            .min_size(Vec2::new(ui.available_width(), 32.0))
            .rounding(self.theme.button_rounding);

            let response = ui.add_enabled(supported, button);
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, supported, "Voice Mode")
            });

            if !supported {
                response.on_hover_text("Speech recognition is not supported on this system");
            } else if response.clicked() {
                self.activate_voice_mode();
            }
            return;
        }

        ui.vertical(|ui| {
            let stop_button = egui::Button::new(
                RichText::new("Stop Voice Mode").color(self.theme.text_primary),
            )
            .min_size(Vec2::new(ui.available_width(), 32.0))
            .fill(self.theme.recording.gamma_multiply(0.3))
            .rounding(self.theme.button_rounding);

            if ui.add(stop_button).clicked() {
                // Does not cancel an in-flight request, only further starts
                self.capture.stop_utterance();
                *self.voice_mode = false;
                self.notifications
                    .push(Notification::info("Voice Mode deactivated"));
            }

            ui.add_space(self.theme.spacing_sm);

            if self.capture.is_capturing() {
                ui.horizontal(|ui| {
                    let t = ui.ctx().input(|i| i.time);
                    let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
                    ui.label(
                        RichText::new("●")
                            .size(14.0)
                            .color(self.theme.recording.gamma_multiply(0.5 + pulse * 0.5)),
                    );
                    ui.label(
                        RichText::new("Voice Recording...")
                            .size(12.0)
                            .color(self.theme.text_secondary),
                    );
                    ui.ctx().request_repaint();
                });
            } else {
                let record_button = egui::Button::new(
                    RichText::new("Start Recording").color(self.theme.text_primary),
                )
                .min_size(Vec2::new(ui.available_width(), 32.0))
                .rounding(self.theme.button_rounding);

                let response = ui.add(record_button);
                response.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Start Recording")
                });
                if response.clicked() && !self.capture.start_utterance() {
                    warn!("Utterance start refused");
                }
            }
        });
    }

    fn show_quiz_button(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.controller.pending();
        let button = egui::Button::new(
            RichText::new("Test Me").color(self.theme.text_primary),
        )
        .min_size(Vec2::new(ui.available_width(), 32.0))
        .fill(self.theme.primary.gamma_multiply(0.6))
        .rounding(self.theme.button_rounding);

        let response = ui.add_enabled(enabled, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, "Test Me")
        });

        if response.clicked() {
            self.controller.request_quiz();
        }
    }

    fn activate_voice_mode(&mut self) {
        match crate::speech::device::request_microphone() {
            Ok(_) => {
                *self.voice_mode = true;
                self.notifications.push(Notification::success(
                    "🎤 Voice Mode activated! Click \"Start Recording\" to speak.",
                ));
            }
            Err(e) => {
                warn!("Microphone acquisition failed: {}", e);
                self.notifications.push(Notification::error(e.user_message()));
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let name = file
                .path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.name.clone());

            let mime = if file.mime.is_empty() {
                infer_mime(&name)
            } else {
                file.mime.clone()
            };

            self.controller.select_file(&name, &mime);
        }
    }
}

/// Extension-based MIME inference for native drops, where the platform
/// does not report a type.
fn infer_mime(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(".pdf") {
        "application/pdf".to_string()
    } else {
        "application/octet-stream".to_string()
    }
}
