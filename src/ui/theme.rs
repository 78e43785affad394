//! Visual theme
//!
//! Centralizes the colors, spacing, and rounding used by the components.

use egui::{Color32, Context, Rounding};

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub primary: Color32,
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,
    pub recording: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub spacing: f32,
    pub spacing_sm: f32,
    pub spacing_lg: f32,
    pub card_rounding: Rounding,
    pub button_rounding: Rounding,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg_primary: Color32::from_rgb(18, 18, 24),
            bg_secondary: Color32::from_rgb(28, 28, 36),
            text_primary: Color32::from_rgb(235, 235, 240),
            text_secondary: Color32::from_rgb(180, 180, 190),
            text_muted: Color32::from_rgb(120, 120, 132),
            primary: Color32::from_rgb(99, 102, 241),
            user_bubble: Color32::from_rgb(67, 70, 160),
            assistant_bubble: Color32::from_rgb(38, 38, 48),
            recording: Color32::from_rgb(239, 68, 68),
            success: Color32::from_rgb(34, 197, 94),
            warning: Color32::from_rgb(234, 179, 8),
            error: Color32::from_rgb(239, 68, 68),
            spacing: 12.0,
            spacing_sm: 6.0,
            spacing_lg: 24.0,
            card_rounding: Rounding::same(10.0),
            button_rounding: Rounding::same(8.0),
        }
    }

    /// Apply base visuals to the egui context
    pub fn apply(&self, ctx: &Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.override_text_color = Some(self.text_primary);
        ctx.set_visuals(visuals);
    }
}
