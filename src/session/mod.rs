//! Chat session core
//!
//! This module provides:
//! - `ConversationState`: the explicitly owned per-session state
//! - `SessionController`: orchestration of sends, answers, and fallbacks
//! - `prompts`: the fixed user-visible strings
//! - `notify`: transient non-blocking notifications

pub mod controller;
pub mod notify;
pub mod prompts;
pub mod state;

pub use controller::{RequestOrigin, SessionController};
pub use notify::{Notification, NotificationLevel};
pub use state::ConversationState;
