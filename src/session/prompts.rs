//! Fixed user-visible strings
//!
//! The fallback texts and the quiz prompt are part of the observable
//! contract; tests lock them down.

/// Assistant greeting seeded into every new conversation
pub const GREETING: &str = "Hello! I'm your AI study partner with voice support. \
Upload your PDF notes, chat with me, click \"Test Me\" to generate quiz questions, \
or use Voice Mode to speak with me!";

/// Synthetic user message shown when the quiz button is pressed
pub const TEST_ME_LABEL: &str = "Test Me - Generate quiz questions";

/// The literal prompt sent for quiz generation, regardless of prior
/// conversation content
pub const QUIZ_PROMPT: &str = "Generate 3 multiple-choice quiz questions from my notes.";

/// Display prefix for voice-origin user messages
pub const VOICE_PREFIX: &str = "🎤 ";

/// Fallback assistant message when a typed send fails
pub const CONNECT_FALLBACK: &str =
    "Sorry, I couldn't connect to the backend. Please check your connection and try again.";

/// Fallback assistant message when a voice send fails
pub const VOICE_FALLBACK: &str =
    "Sorry, I couldn't process your voice message. Please try again.";

/// Fallback assistant message when quiz generation fails
pub const QUIZ_FALLBACK: &str =
    "Sorry, I couldn't generate quiz questions. Please try again.";
