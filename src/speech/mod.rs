//! Speech capture for voice mode
//!
//! This module provides:
//! - `SpeechRecognizer`: the seam to the platform speech-to-text facility
//! - `CapturePipeline`: single-utterance capture with one terminal event
//! - `device`: microphone acquisition before capture is allowed

pub mod capture;
pub mod device;

pub use capture::{
    CaptureCommand, CaptureControls, CaptureEvent, CapturePipeline, SpeechRecognizer,
    UtteranceOutcome,
};
