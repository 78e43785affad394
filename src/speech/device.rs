//! Microphone acquisition
//!
//! Voice mode requires a usable input device before any capture starts.
//! On native platforms access is gated at the OS device layer, so a
//! missing or unopenable default device is the permission-denied analog.

use crate::{Result, StudyError};

#[cfg(feature = "audio-io")]
pub fn request_microphone() -> Result<String> {
    use cpal::traits::{DeviceTrait, HostTrait};
    use tracing::info;

    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .ok_or_else(|| StudyError::DeviceError("No input device available".into()))?;

    let name = device.name().unwrap_or_else(|_| "Unknown".to_string());

    device
        .default_input_config()
        .map_err(|e| StudyError::DeviceError(format!("Failed to get input config: {e}")))?;

    info!("Using input device: {}", name);
    Ok(name)
}

#[cfg(not(feature = "audio-io"))]
pub fn request_microphone() -> Result<String> {
    Err(StudyError::DeviceError(
        "Audio input support not compiled in".into(),
    ))
}
