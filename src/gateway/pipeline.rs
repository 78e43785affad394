//! Gateway pipeline for relaying questions to the remote QA service
//!
//! Provides a channel-based interface: commands go in, exactly one
//! `Answer` or `Failed` event comes out per ask. The worker processes one
//! command at a time, which together with the session `pending` gate keeps
//! at most one request in flight.

use super::client::QaClient;
use super::GatewayFailure;
use crate::config::GatewayConfig;
use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands that can be sent to the gateway pipeline
#[derive(Debug, Clone)]
pub enum GatewayCommand {
    /// Relay a question to the QA service
    Ask {
        /// The question text
        question: String,
        /// Unique request ID for tracking
        request_id: Uuid,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the gateway pipeline
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// The service answered
    Answer {
        /// Extracted answer text
        text: String,
        /// Request ID this answer belongs to
        request_id: Uuid,
        /// Round-trip time in milliseconds
        elapsed_ms: u64,
    },

    /// The ask failed
    Failed {
        /// The discriminated failure
        failure: GatewayFailure,
        /// Request ID if applicable
        request_id: Option<Uuid>,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Gateway pipeline with channel-based communication
pub struct GatewayPipeline {
    /// Configuration
    config: GatewayConfig,

    /// Command sender
    command_tx: Sender<GatewayCommand>,

    /// Command receiver (for worker)
    command_rx: Receiver<GatewayCommand>,

    /// Event sender (for worker)
    event_tx: Sender<GatewayEvent>,

    /// Event receiver
    event_rx: Receiver<GatewayEvent>,
}

impl GatewayPipeline {
    /// Create a new gateway pipeline
    pub fn new(config: GatewayConfig) -> Self {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<GatewayCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<GatewayEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread
    ///
    /// This spawns a new thread that handles HTTP requests to the QA
    /// service.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Gateway pipeline worker starting");

            // Create tokio runtime for async operations
            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(GatewayEvent::Failed {
                        failure: GatewayFailure::Network(format!("runtime creation failed: {e}")),
                        request_id: None,
                    });
                    let _ = event_tx.send(GatewayEvent::Shutdown);
                    return;
                }
            };

            let client = match QaClient::new(&config) {
                Ok(client) => client,
                Err(e) => {
                    error!("Failed to build QA client: {}", e);
                    let _ = event_tx.send(GatewayEvent::Failed {
                        failure: GatewayFailure::Network(e.to_string()),
                        request_id: None,
                    });
                    let _ = event_tx.send(GatewayEvent::Shutdown);
                    return;
                }
            };

            info!("Gateway pipeline worker ready");

            // Process commands
            loop {
                match command_rx.recv() {
                    Ok(GatewayCommand::Ask {
                        question,
                        request_id,
                    }) => {
                        debug!("Processing ask request: {}", request_id);

                        let start_time = Instant::now();
                        let result = runtime.block_on(client.ask(&question));
                        let elapsed_ms = start_time.elapsed().as_millis() as u64;

                        match result {
                            Ok(text) => {
                                debug!(
                                    "Answer received: {} chars in {}ms",
                                    text.len(),
                                    elapsed_ms
                                );
                                let _ = event_tx.send(GatewayEvent::Answer {
                                    text,
                                    request_id,
                                    elapsed_ms,
                                });
                            }
                            Err(failure) => {
                                error!("Ask failed after {}ms: {}", elapsed_ms, failure);
                                let _ = event_tx.send(GatewayEvent::Failed {
                                    failure,
                                    request_id: Some(request_id),
                                });
                            }
                        }
                    }

                    Ok(GatewayCommand::Shutdown) => {
                        info!("Gateway pipeline worker shutting down");
                        let _ = event_tx.send(GatewayEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        error!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Gateway pipeline worker stopped");
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_creation() {
        let config = GatewayConfig::default();
        let pipeline = GatewayPipeline::new(config);

        // Verify channels are created
        let _cmd_tx = pipeline.command_sender();
        let _event_rx = pipeline.event_receiver();
    }

    #[test]
    fn test_command_variants() {
        let cmd = GatewayCommand::Ask {
            question: "What is osmosis?".to_string(),
            request_id: Uuid::new_v4(),
        };

        match cmd {
            GatewayCommand::Ask { question, .. } => assert_eq!(question, "What is osmosis?"),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_event_variants() {
        let request_id = Uuid::new_v4();

        let _answer = GatewayEvent::Answer {
            text: "Osmosis is...".to_string(),
            request_id,
            elapsed_ms: 120,
        };

        let _failed = GatewayEvent::Failed {
            failure: GatewayFailure::Timeout,
            request_id: Some(request_id),
        };

        let _shutdown = GatewayEvent::Shutdown;
    }
}
