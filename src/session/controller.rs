//! Session controller
//!
//! The one orchestration point of the application: it owns the
//! `ConversationState`, relays questions through the gateway channels,
//! converts answers and failures into chat messages, and turns capture
//! outcomes into sends or notifications. All mutation happens here, on
//! the frame loop; the `pending` flag gates every new request.

use super::notify::Notification;
use super::prompts::{
    CONNECT_FALLBACK, QUIZ_FALLBACK, QUIZ_PROMPT, TEST_ME_LABEL, VOICE_FALLBACK, VOICE_PREFIX,
};
use super::state::ConversationState;
use crate::gateway::{GatewayCommand, GatewayEvent};
use crate::messages::{Message, Sender};
use crate::speech::{CaptureEvent, UtteranceOutcome};
use crossbeam_channel::{Receiver, Sender as ChannelSender};
use std::collections::VecDeque;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// MIME type accepted by the upload card
const PDF_MIME: &str = "application/pdf";

/// What kind of send produced the current in-flight request. Decides the
/// fallback message when the request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    Typed,
    Voice,
    Quiz,
}

impl RequestOrigin {
    fn fallback_text(self) -> &'static str {
        match self {
            RequestOrigin::Typed => CONNECT_FALLBACK,
            RequestOrigin::Voice => VOICE_FALLBACK,
            RequestOrigin::Quiz => QUIZ_FALLBACK,
        }
    }

    fn failure_notice(self) -> &'static str {
        match self {
            RequestOrigin::Typed => "Failed to send message",
            RequestOrigin::Voice => "Failed to process voice message",
            RequestOrigin::Quiz => "Failed to generate quiz",
        }
    }
}

struct InFlight {
    request_id: Uuid,
    origin: RequestOrigin,
}

/// Orchestration logic for one chat session
pub struct SessionController {
    /// Conversation state, explicitly owned (no ambient/global access)
    state: ConversationState,

    /// Channel to send gateway commands
    gateway_tx: Option<ChannelSender<GatewayCommand>>,

    /// Channel to receive gateway events
    gateway_rx: Option<Receiver<GatewayEvent>>,

    /// Channel to receive capture events
    capture_rx: Option<Receiver<CaptureEvent>>,

    /// Queued transient notifications, drained by the UI
    notifications: VecDeque<Notification>,

    /// The single outstanding request, if any
    in_flight: Option<InFlight>,
}

impl SessionController {
    pub fn new(state: ConversationState) -> Self {
        Self {
            state,
            gateway_tx: None,
            gateway_rx: None,
            capture_rx: None,
            notifications: VecDeque::new(),
            in_flight: None,
        }
    }

    /// Wire up the gateway pipeline channels
    pub fn attach_gateway(
        &mut self,
        command_tx: ChannelSender<GatewayCommand>,
        event_rx: Receiver<GatewayEvent>,
    ) {
        self.gateway_tx = Some(command_tx);
        self.gateway_rx = Some(event_rx);
    }

    /// Wire up the capture pipeline events
    pub fn attach_capture(&mut self, event_rx: Receiver<CaptureEvent>) {
        self.capture_rx = Some(event_rx);
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Whether a request is outstanding. Send affordances must be
    /// disabled while this is true.
    pub fn pending(&self) -> bool {
        self.state.pending()
    }

    /// Take all queued notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Send a typed question. Empty or whitespace-only input is silently
    /// ignored; a send while a request is pending is refused.
    pub fn send_typed(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.state.pending() {
            debug!("Send refused: request already pending");
            return;
        }

        self.state.append(Message::new(Sender::User, text));
        self.dispatch(text.to_string(), RequestOrigin::Typed);
    }

    /// Send a finalized voice transcript. Same path as a typed send, but
    /// the user message is marked voice-origin and prefixed for display.
    pub fn send_voice_transcript(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if self.state.pending() {
            debug!("Voice send refused: request already pending");
            return;
        }

        self.state.append(Message::voice(
            Sender::User,
            format!("{VOICE_PREFIX}{transcript}"),
        ));
        self.dispatch(transcript.to_string(), RequestOrigin::Voice);
    }

    /// Ask the service for quiz questions using the fixed canned prompt.
    pub fn request_quiz(&mut self) {
        if self.state.pending() {
            debug!("Quiz refused: request already pending");
            return;
        }

        self.state.append(Message::new(Sender::User, TEST_ME_LABEL));
        self.dispatch(QUIZ_PROMPT.to_string(), RequestOrigin::Quiz);
    }

    /// Record a picked file. Only PDFs are accepted; the name is stored
    /// for display only and the content is never read.
    pub fn select_file(&mut self, name: &str, mime: &str) {
        if mime == PDF_MIME {
            info!("PDF selected: {}", name);
            self.state.set_selected_file(name.to_string());
            self.notifications
                .push_back(Notification::success(format!(
                    "PDF Uploaded Successfully: {name}"
                )));
        } else {
            warn!("Rejected non-PDF file: {} ({})", name, mime);
            self.notifications
                .push_back(Notification::error("Please upload a PDF file"));
        }
    }

    /// Drain pipeline events and fold them into the conversation. Called
    /// once per frame.
    pub fn poll_events(&mut self) {
        let gateway_events: Vec<GatewayEvent> = match &self.gateway_rx {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        for event in gateway_events {
            self.handle_gateway_event(event);
        }

        let capture_events: Vec<CaptureEvent> = match &self.capture_rx {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        for event in capture_events {
            self.handle_capture_event(event);
        }
    }

    fn dispatch(&mut self, question: String, origin: RequestOrigin) {
        let request_id = Uuid::new_v4();
        let sent = match &self.gateway_tx {
            Some(tx) => tx
                .send(GatewayCommand::Ask {
                    question,
                    request_id,
                })
                .is_ok(),
            None => false,
        };

        if sent {
            debug!("Dispatched request {} ({:?})", request_id, origin);
            self.state.set_pending(true);
            self.in_flight = Some(InFlight { request_id, origin });
        } else {
            // Gateway gone: fail in place, same user-visible path
            warn!("Gateway unavailable, failing request immediately");
            self.state
                .append(Message::new(Sender::Assistant, origin.fallback_text()));
            self.notifications
                .push_back(Notification::error(origin.failure_notice()));
        }
    }

    fn handle_gateway_event(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::Answer {
                text,
                request_id,
                elapsed_ms,
            } => {
                let Some(in_flight) = self.in_flight.take() else {
                    warn!("Ignoring answer with no request in flight");
                    return;
                };
                if in_flight.request_id != request_id {
                    warn!("Ignoring stale answer for request {}", request_id);
                    self.in_flight = Some(in_flight);
                    return;
                }

                debug!("Answer for {} after {}ms", request_id, elapsed_ms);
                self.state.append(Message::new(Sender::Assistant, text));
                if in_flight.origin == RequestOrigin::Voice {
                    self.notifications
                        .push_back(Notification::success("Voice message processed!"));
                }
                self.state.set_pending(false);
            }

            GatewayEvent::Failed {
                failure,
                request_id,
            } => {
                let Some(in_flight) = self.in_flight.take() else {
                    warn!("Gateway failure with no request in flight: {}", failure);
                    return;
                };
                if let Some(request_id) = request_id {
                    if in_flight.request_id != request_id {
                        warn!("Ignoring stale failure for request {}", request_id);
                        self.in_flight = Some(in_flight);
                        return;
                    }
                }

                info!("Request {} failed: {}", in_flight.request_id, failure);
                self.state.append(Message::new(
                    Sender::Assistant,
                    in_flight.origin.fallback_text(),
                ));
                self.notifications
                    .push_back(Notification::error(in_flight.origin.failure_notice()));
                self.state.set_pending(false);
            }

            GatewayEvent::Shutdown => {
                info!("Gateway pipeline shut down");
            }
        }
    }

    fn handle_capture_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::UtteranceStarted => {
                debug!("Utterance started");
            }

            CaptureEvent::UtteranceFinished(outcome) => match outcome {
                UtteranceOutcome::Recognized(transcript) => {
                    debug!("Recognized transcript ({} chars)", transcript.len());
                    self.send_voice_transcript(&transcript);
                }
                UtteranceOutcome::NoSpeech => {
                    self.notifications
                        .push_back(Notification::error("No speech detected. Please try again."));
                }
                UtteranceOutcome::PermissionDenied => {
                    self.notifications
                        .push_back(Notification::error("Microphone access denied."));
                }
                UtteranceOutcome::Failed(code) => {
                    warn!("Voice recognition failed: {}", code);
                    self.notifications
                        .push_back(Notification::error("Voice recognition failed"));
                }
            },

            CaptureEvent::Shutdown => {
                info!("Capture pipeline shut down");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayFailure;
    use crate::session::notify::NotificationLevel;
    use crate::session::prompts::GREETING;
    use crossbeam_channel::unbounded;

    /// Controller wired to hand-held channel ends standing in for the
    /// gateway worker.
    struct Harness {
        controller: SessionController,
        command_rx: Receiver<GatewayCommand>,
        event_tx: ChannelSender<GatewayEvent>,
    }

    impl Harness {
        fn new() -> Self {
            let (command_tx, command_rx) = unbounded();
            let (event_tx, event_rx) = unbounded();

            let mut controller = SessionController::new(ConversationState::new());
            controller.attach_gateway(command_tx, event_rx);

            Self {
                controller,
                command_rx,
                event_tx,
            }
        }

        fn outstanding_ask(&self) -> (String, Uuid) {
            match self.command_rx.try_recv().expect("an ask command") {
                GatewayCommand::Ask {
                    question,
                    request_id,
                } => (question, request_id),
                other => panic!("unexpected command: {other:?}"),
            }
        }

        fn answer(&mut self, request_id: Uuid, text: &str) {
            self.event_tx
                .send(GatewayEvent::Answer {
                    text: text.to_string(),
                    request_id,
                    elapsed_ms: 42,
                })
                .unwrap();
            self.controller.poll_events();
        }

        fn fail(&mut self, request_id: Uuid, failure: GatewayFailure) {
            self.event_tx
                .send(GatewayEvent::Failed {
                    failure,
                    request_id: Some(request_id),
                })
                .unwrap();
            self.controller.poll_events();
        }

        fn texts(&self) -> Vec<String> {
            self.controller
                .state()
                .messages()
                .get_all()
                .iter()
                .map(|m| m.text.clone())
                .collect()
        }
    }

    #[test]
    fn test_typed_send_success_appends_exactly_two() {
        let mut h = Harness::new();
        h.controller.send_typed("What is osmosis?");

        let (question, request_id) = h.outstanding_ask();
        assert_eq!(question, "What is osmosis?");
        assert!(h.controller.pending());

        h.answer(request_id, "Osmosis is...");
        assert!(!h.controller.pending());

        let texts = h.texts();
        assert_eq!(texts, vec![GREETING, "What is osmosis?", "Osmosis is..."]);
    }

    #[test]
    fn test_typed_send_failure_appends_fallback() {
        let mut h = Harness::new();
        h.controller.send_typed("What is osmosis?");
        let (_, request_id) = h.outstanding_ask();

        h.fail(request_id, GatewayFailure::Timeout);
        assert!(!h.controller.pending());

        let texts = h.texts();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[2], CONNECT_FALLBACK);

        let notices = h.controller.take_notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_empty_input_is_silently_ignored() {
        let mut h = Harness::new();
        h.controller.send_typed("");
        h.controller.send_typed("   \t\n");

        assert_eq!(h.controller.state().messages().len(), 1); // greeting only
        assert!(h.command_rx.try_recv().is_err());
        assert!(!h.controller.pending());
    }

    #[test]
    fn test_pending_gates_overlapping_sends() {
        let mut h = Harness::new();
        h.controller.send_typed("first");
        let (_, request_id) = h.outstanding_ask();

        // Refused while pending: no message, no command
        h.controller.send_typed("second");
        h.controller.request_quiz();
        h.controller.send_voice_transcript("third");
        assert!(h.command_rx.try_recv().is_err());
        assert_eq!(h.controller.state().messages().len(), 2);

        // Cycle back to idle, then a new send is allowed
        h.answer(request_id, "answer");
        assert!(!h.controller.pending());
        h.controller.send_typed("second");
        assert!(h.controller.pending());
        let (question, _) = h.outstanding_ask();
        assert_eq!(question, "second");
    }

    #[test]
    fn test_voice_send_prefixes_and_marks_origin() {
        let mut h = Harness::new();
        h.controller.send_voice_transcript("what is photosynthesis");

        let messages = h.controller.state().messages().get_all();
        assert_eq!(messages[1].text, "🎤 what is photosynthesis");
        assert!(messages[1].metadata.is_voice);

        // The raw transcript is what goes over the wire
        let (question, request_id) = h.outstanding_ask();
        assert_eq!(question, "what is photosynthesis");

        h.fail(request_id, GatewayFailure::Network("boom".into()));
        assert_eq!(h.texts()[2], VOICE_FALLBACK);
    }

    #[test]
    fn test_quiz_sends_literal_prompt() {
        let mut h = Harness::new();
        h.controller.send_typed("unrelated earlier context");
        let (_, id) = h.outstanding_ask();
        h.answer(id, "noted");

        h.controller.request_quiz();
        let (question, request_id) = h.outstanding_ask();
        assert_eq!(question, QUIZ_PROMPT);
        assert_eq!(h.texts().last().map(String::as_str), Some(TEST_ME_LABEL));

        h.fail(request_id, GatewayFailure::Server(502));
        assert_eq!(h.texts().last().map(String::as_str), Some(QUIZ_FALLBACK));
    }

    #[test]
    fn test_select_file_accepts_pdf_only() {
        let mut h = Harness::new();

        h.controller.select_file("notes.pdf", "application/pdf");
        assert_eq!(h.controller.state().selected_file(), Some("notes.pdf"));
        let notices = h.controller.take_notifications();
        assert_eq!(notices[0].level, NotificationLevel::Success);

        h.controller.select_file("notes.txt", "text/plain");
        // Unchanged, rejection notice, no message appended
        assert_eq!(h.controller.state().selected_file(), Some("notes.pdf"));
        let notices = h.controller.take_notifications();
        assert_eq!(notices[0].level, NotificationLevel::Error);
        assert_eq!(h.controller.state().messages().len(), 1);
    }

    #[test]
    fn test_recognized_utterance_flows_into_send() {
        let (capture_tx, capture_rx) = unbounded();
        let mut h = Harness::new();
        h.controller.attach_capture(capture_rx);

        capture_tx
            .send(CaptureEvent::UtteranceFinished(
                UtteranceOutcome::Recognized("define mitosis".to_string()),
            ))
            .unwrap();
        h.controller.poll_events();

        let (question, _) = h.outstanding_ask();
        assert_eq!(question, "define mitosis");
        assert!(h.controller.pending());
    }

    #[test]
    fn test_capture_errors_notify_without_messages() {
        let (capture_tx, capture_rx) = unbounded();
        let mut h = Harness::new();
        h.controller.attach_capture(capture_rx);

        for outcome in [
            UtteranceOutcome::NoSpeech,
            UtteranceOutcome::PermissionDenied,
            UtteranceOutcome::Failed("network".to_string()),
        ] {
            capture_tx
                .send(CaptureEvent::UtteranceFinished(outcome))
                .unwrap();
        }
        h.controller.poll_events();

        assert_eq!(h.controller.state().messages().len(), 1);
        assert_eq!(h.controller.take_notifications().len(), 3);
        assert!(h.command_rx.try_recv().is_err());
    }

    #[test]
    fn test_detached_gateway_fails_in_place() {
        let mut controller = SessionController::new(ConversationState::new());
        controller.send_typed("anyone there?");

        let texts: Vec<String> = controller
            .state()
            .messages()
            .get_all()
            .iter()
            .map(|m| m.text.clone())
            .collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[2], CONNECT_FALLBACK);
        assert!(!controller.pending());
    }
}
