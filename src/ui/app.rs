//! Main application struct and eframe integration
//!
//! This module contains the StudyApp that implements eframe::App.

use crate::session::{Notification, SessionController};
use crate::speech::CaptureControls;
use crate::ui::components::{InputBar, MessageList, SidePanelContent, ToastOverlay};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, SidePanel, TopBottomPanel, RichText};
use tracing::info;

/// Main StudySphere application
pub struct StudyApp {
    /// Session controller owning the conversation state
    controller: SessionController,
    /// Voice capture controls
    capture: CaptureControls,
    /// Visual theme
    theme: Theme,
    /// Text currently in the input bar
    input_text: String,
    /// Whether voice mode is active
    voice_mode: bool,
    /// Toast overlay
    toasts: ToastOverlay,
    /// Notifications produced by UI-side actions this frame
    ui_notifications: Vec<Notification>,
    /// Whether the app has been initialized
    initialized: bool,
}

impl StudyApp {
    /// Create a new StudySphere application
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: SessionController,
        capture: CaptureControls,
    ) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            controller,
            capture,
            theme,
            input_text: String::new(),
            voice_mode: false,
            toasts: ToastOverlay::new(),
            ui_notifications: Vec::new(),
            initialized: false,
        }
    }

    /// One-time startup work (called on first frame)
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        info!(
            "StudySphere UI initialized (voice supported: {})",
            self.capture.is_supported()
        );
        self.initialized = true;
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Chat with AI")
                            .size(18.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    if self.voice_mode {
                        ui.label(
                            RichText::new("🎤 Voice Active")
                                .size(12.0)
                                .color(self.theme.primary),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.controller.pending() {
                            ui.label(
                                RichText::new("thinking…")
                                    .size(12.0)
                                    .color(self.theme.text_muted),
                            );
                        }
                    });
                });
            });
    }

    fn show_side_panel(&mut self, ctx: &egui::Context) {
        SidePanel::left("side_panel")
            .resizable(false)
            .exact_width(260.0)
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                SidePanelContent::new(
                    &mut self.controller,
                    &self.capture,
                    &mut self.voice_mode,
                    &self.theme,
                    &mut self.ui_notifications,
                )
                .show(ui);
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                InputBar::new(&mut self.controller, &mut self.input_text, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                MessageList::new(&self.controller, &self.theme).show(ui);
            });
    }
}

impl eframe::App for StudyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Initialize on first frame
        self.initialize();

        // Fold pipeline results into the conversation
        self.controller.poll_events();

        // Render UI
        self.show_header(ctx);
        self.show_side_panel(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // Collect this frame's notifications into the toast overlay
        let mut notifications = self.controller.take_notifications();
        notifications.append(&mut self.ui_notifications);
        self.toasts.push_all(notifications);
        self.toasts.show(ctx, &self.theme);

        // Keep polling while work is outstanding
        if self.controller.pending() || self.capture.is_capturing() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("StudySphere shutting down");
    }
}
