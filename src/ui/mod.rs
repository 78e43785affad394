//! egui user interface

pub mod app;
pub mod components;
pub mod theme;

pub use app::StudyApp;
pub use theme::Theme;
