//! Gateway to the remote question-answering service
//!
//! This module provides:
//! - `QaClient`: the HTTP client performing a single ask
//! - `GatewayPipeline`: a worker-thread wrapper with channel-based
//!   command/event communication

pub mod client;
pub mod pipeline;

pub use client::{extract_answer, QaClient};
pub use pipeline::{GatewayCommand, GatewayEvent, GatewayPipeline};

use thiserror::Error;

/// Discriminated failure of a single gateway call. The gateway never lets
/// an error escape undiscriminated; callers always receive one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayFailure {
    #[error("network failure: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("server returned status {0}")]
    Server(u16),
}
