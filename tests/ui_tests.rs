//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests verify the chat surface by simulating user interactions
//! and checking the accessibility tree for expected elements.

use crossbeam_channel::unbounded;
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use studysphere::session::{ConversationState, SessionController};
use studysphere::ui::components::{InputBar, MessageList};
use studysphere::ui::Theme;

/// Application state wrapper for testing
struct TestApp {
    controller: SessionController,
    input_text: String,
    theme: Theme,
}

impl TestApp {
    fn new() -> Self {
        Self {
            controller: SessionController::new(ConversationState::new()),
            input_text: String::new(),
            theme: Theme::dark(),
        }
    }

    /// Attach gateway channels so sends stay pending instead of failing
    /// in place, and return the command end for inspection.
    fn with_live_gateway(mut self) -> (Self, crossbeam_channel::Receiver<studysphere::gateway::GatewayCommand>) {
        let (command_tx, command_rx) = unbounded();
        let (_event_tx, event_rx) = unbounded();
        self.controller.attach_gateway(command_tx, event_rx);
        (self, command_rx)
    }
}

fn build_harness(app: TestApp) -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(500.0, 600.0))
        .build_state(
            |ctx, app: &mut TestApp| {
                egui::TopBottomPanel::bottom("input").show(ctx, |ui| {
                    InputBar::new(&mut app.controller, &mut app.input_text, &app.theme).show(ui);
                });
                egui::CentralPanel::default().show(ctx, |ui| {
                    MessageList::new(&app.controller, &app.theme).show(ui);
                });
            },
            app,
        )
}

#[test]
fn test_message_input_and_send_button_exist() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    let _input = harness.get_by_label("Message input");
    let _button = harness.get_by_label("Send message");
}

#[test]
fn test_greeting_is_shown() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    let expected = format!(
        "Assistant response: {}",
        studysphere::session::prompts::GREETING
    );
    let _greeting = harness.get_by_label(&expected);
}

#[test]
fn test_type_and_send_appends_user_message() {
    let (app, command_rx) = TestApp::new().with_live_gateway();
    let mut harness = build_harness(app);
    harness.run();

    harness.get_by_label("Message input").focus();
    harness.run();
    harness
        .get_by_label("Message input")
        .type_text("What is osmosis?");
    harness.run();
    assert_eq!(harness.state().input_text, "What is osmosis?");

    harness.get_by_label("Send message").click();
    harness.run();

    // Input cleared, user message appended, request dispatched
    assert!(harness.state().input_text.is_empty());
    let messages = harness.state().controller.state().messages().get_all();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text, "What is osmosis?");
    assert!(harness.state().controller.pending());
    assert!(command_rx.try_recv().is_ok());
}

#[test]
fn test_send_disabled_while_pending() {
    let (mut app, _command_rx) = TestApp::new().with_live_gateway();
    app.controller.send_typed("first question");
    assert!(app.controller.pending());

    let mut harness = build_harness(app);
    harness.run();

    // The send button is present but disabled while a request is pending
    let _disabled = harness.get_by_label("Send message");
    let messages = harness.state().controller.state().messages().get_all();
    assert_eq!(messages.len(), 2);
}
