//! Single-utterance speech capture
//!
//! Recording is non-continuous: one start, one bounded span of speech, one
//! terminal outcome. The platform recognizer sits behind the
//! `SpeechRecognizer` trait; the pipeline guarantees exactly one
//! `UtteranceFinished` event per started utterance and an idempotent stop.

use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The single terminal event of one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceOutcome {
    /// A finalized transcript was produced
    Recognized(String),

    /// The utterance ended without detectable speech
    NoSpeech,

    /// Microphone permission was denied mid-capture
    PermissionDenied,

    /// Any other recognizer failure, with the platform error code
    Failed(String),
}

/// Seam to the platform speech-to-text facility.
///
/// `capture` blocks for the duration of one utterance and must return
/// early (typically with `NoSpeech`) once `cancelled` is set.
pub trait SpeechRecognizer: Send + 'static {
    fn capture(&mut self, cancelled: &AtomicBool) -> UtteranceOutcome;
}

/// Commands that can be sent to the capture pipeline
#[derive(Debug, Clone)]
pub enum CaptureCommand {
    /// Begin one utterance
    StartUtterance,

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the capture pipeline
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// The recognizer is listening
    UtteranceStarted,

    /// The utterance terminated; exactly one of these per start
    UtteranceFinished(UtteranceOutcome),

    /// Pipeline has shut down
    Shutdown,
}

/// Cloneable handle for driving capture from the UI
#[derive(Clone)]
pub struct CaptureControls {
    command_tx: Sender<CaptureCommand>,
    supported: bool,
    capturing: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
}

impl CaptureControls {
    /// Capability probe, done once at startup
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Whether an utterance is currently being captured
    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    /// Begin one utterance. Returns false when capture is unsupported or
    /// an utterance is already active.
    pub fn start_utterance(&self) -> bool {
        if !self.supported {
            warn!("Start refused: speech capture not supported");
            return false;
        }
        if self
            .capturing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Start refused: utterance already active");
            return false;
        }

        self.cancelled.store(false, Ordering::SeqCst);
        if self.command_tx.send(CaptureCommand::StartUtterance).is_err() {
            self.capturing.store(false, Ordering::SeqCst);
            warn!("Start refused: capture worker gone");
            return false;
        }
        true
    }

    /// Cancel an in-flight capture early. Safe to call when no capture is
    /// active.
    pub fn stop_utterance(&self) {
        if self.capturing.load(Ordering::SeqCst) {
            debug!("Cancelling in-flight utterance");
            self.cancelled.store(true, Ordering::SeqCst);
        }
    }
}

/// Capture pipeline with channel-based communication
pub struct CapturePipeline {
    /// Platform recognizer; `None` means the capability is absent
    recognizer: Option<Box<dyn SpeechRecognizer>>,

    /// Command sender
    command_tx: Sender<CaptureCommand>,

    /// Command receiver (for worker)
    command_rx: Receiver<CaptureCommand>,

    /// Event sender (for worker)
    event_tx: Sender<CaptureEvent>,

    /// Event receiver
    event_rx: Receiver<CaptureEvent>,

    /// Whether an utterance is active
    capturing: Arc<AtomicBool>,

    /// Early-cancellation flag for the recognizer
    cancelled: Arc<AtomicBool>,
}

impl CapturePipeline {
    /// Create a new capture pipeline. Passing `None` models a platform
    /// without speech-to-text; the controls then report unsupported.
    pub fn new(recognizer: Option<Box<dyn SpeechRecognizer>>) -> Self {
        let (command_tx, command_rx) = bounded(16);
        let (event_tx, event_rx) = bounded(16);

        Self {
            recognizer,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
            capturing: Arc::new(AtomicBool::new(false)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Capability probe
    pub fn is_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Get a handle for driving capture
    pub fn controls(&self) -> CaptureControls {
        CaptureControls {
            command_tx: self.command_tx.clone(),
            supported: self.is_supported(),
            capturing: Arc::clone(&self.capturing),
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<CaptureEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread
    pub fn start_worker(mut self) -> Result<()> {
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();
        let capturing = Arc::clone(&self.capturing);
        let cancelled = Arc::clone(&self.cancelled);
        let mut recognizer = self.recognizer.take();

        std::thread::spawn(move || {
            info!(
                "Capture pipeline worker starting (supported: {})",
                recognizer.is_some()
            );

            loop {
                match command_rx.recv() {
                    Ok(CaptureCommand::StartUtterance) => {
                        let outcome = match recognizer.as_mut() {
                            Some(recognizer) => {
                                let _ = event_tx.send(CaptureEvent::UtteranceStarted);
                                debug!("Utterance started");
                                recognizer.capture(&cancelled)
                            }
                            None => UtteranceOutcome::Failed("capture-unsupported".to_string()),
                        };

                        capturing.store(false, Ordering::SeqCst);
                        debug!("Utterance finished: {:?}", outcome);
                        let _ = event_tx.send(CaptureEvent::UtteranceFinished(outcome));
                    }

                    Ok(CaptureCommand::Shutdown) => {
                        info!("Capture pipeline worker shutting down");
                        let _ = event_tx.send(CaptureEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        warn!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Capture pipeline worker stopped");
        });

        Ok(())
    }
}
