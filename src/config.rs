//! Application configuration
//!
//! Provides centralized configuration for the gateway and voice capture.

use std::time::Duration;

/// Fixed upstream QA service the client talks to.
pub const DEFAULT_ENDPOINT: &str =
    "https://studysphere-c3jet4vgr4gooj9g8vq5tm.streamlit.app";

/// Client-side bound on a single ask. There is no retry and no
/// cancellation; this timeout is the only limit on an in-flight request.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for the remote QA gateway
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Endpoint the question payload is POSTed to
    pub endpoint: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Configuration for speech capture
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Recognition language tag
    pub language: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
        }
    }
}

/// Configuration for the complete application
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Gateway configuration
    pub gateway: GatewayConfig,

    /// Speech capture configuration
    pub capture: CaptureConfig,

    /// Whether to enable audio input (voice mode)
    pub enable_audio_input: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            capture: CaptureConfig::default(),
            enable_audio_input: true,
        }
    }
}

impl AppConfig {
    /// Set the gateway configuration
    pub fn with_gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = gateway;
        self
    }

    /// Point the gateway at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.gateway.endpoint = endpoint.into();
        self
    }

    /// Disable audio input (text-only mode)
    pub fn without_audio_input(mut self) -> Self {
        self.enable_audio_input = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.gateway.endpoint.is_empty() {
            return Err("Gateway endpoint is required".to_string());
        }
        if !self.gateway.endpoint.starts_with("http://")
            && !self.gateway.endpoint.starts_with("https://")
        {
            return Err(format!(
                "Gateway endpoint must be an http(s) URL: {}",
                self.gateway.endpoint
            ));
        }
        if self.gateway.timeout.is_zero() {
            return Err("Gateway timeout must be non-zero".to_string());
        }
        Ok(())
    }
}
