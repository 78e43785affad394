pub mod config;
pub mod gateway;
pub mod messages;
pub mod session;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StudyError {
    #[error("Audio device error: {0}")]
    DeviceError(String),

    #[error("Gateway error: {0}")]
    GatewayError(String),

    #[error("Speech capture error: {0}")]
    CaptureError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl StudyError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            StudyError::DeviceError(_) => false,
            // Transient; the user can simply re-issue the action
            StudyError::GatewayError(_) => true,
            StudyError::CaptureError(_) => true,
            StudyError::ConfigError(_) => false,
            StudyError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            StudyError::DeviceError(_) => {
                "Microphone access denied. Please allow microphone permissions.".to_string()
            }
            StudyError::GatewayError(_) => {
                "Could not reach the study backend. Please try again.".to_string()
            }
            StudyError::CaptureError(_) => {
                "Voice recognition failed. Please try again.".to_string()
            }
            StudyError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            StudyError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;
