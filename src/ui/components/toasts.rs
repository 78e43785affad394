//! Toast overlay
//!
//! Transient, non-blocking notifications shown in the bottom-right corner
//! and discarded after a short TTL.

use crate::session::{Notification, NotificationLevel};
use crate::ui::theme::Theme;
use egui::{self, Align2, RichText, Vec2};
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_millis(3500);
const MAX_VISIBLE: usize = 4;

struct ActiveToast {
    notification: Notification,
    shown_at: Instant,
}

/// Toast overlay holding the currently visible notifications
pub struct ToastOverlay {
    toasts: Vec<ActiveToast>,
}

impl ToastOverlay {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    /// Queue a batch of notifications for display
    pub fn push_all(&mut self, notifications: Vec<Notification>) {
        for notification in notifications {
            self.toasts.push(ActiveToast {
                notification,
                shown_at: Instant::now(),
            });
        }
        let overflow = self.toasts.len().saturating_sub(MAX_VISIBLE);
        if overflow > 0 {
            self.toasts.drain(0..overflow);
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) {
        self.toasts.retain(|t| t.shown_at.elapsed() < TOAST_TTL);
        if self.toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toast_overlay"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -16.0))
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let accent = match toast.notification.level {
                        NotificationLevel::Success => theme.success,
                        NotificationLevel::Info => theme.primary,
                        NotificationLevel::Error => theme.error,
                    };

                    egui::Frame::none()
                        .fill(theme.bg_secondary)
                        .stroke(egui::Stroke::new(1.0, accent))
                        .rounding(theme.card_rounding)
                        .inner_margin(theme.spacing_sm + 4.0)
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(
                                RichText::new(&toast.notification.text)
                                    .size(13.0)
                                    .color(theme.text_primary),
                            );
                        });
                    ui.add_space(theme.spacing_sm);
                }
            });

        // Keep repainting so toasts expire without input events
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl Default for ToastOverlay {
    fn default() -> Self {
        Self::new()
    }
}
