//! Telemetry link abstraction.
//!
//! The streaming task hands samples to this trait one at a time; framing
//! and transport (UART, Bluetooth, USB) are the link implementation's
//! business. A busy link is a transient condition; the streaming task
//! keeps the sample queued and retries on its next slice.

use crate::subsystems::telemetry::TelemetrySample;

/// Telemetry link error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The link cannot accept a sample right now; retry later
    Busy,
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkError::Busy => write!(f, "telemetry link busy"),
        }
    }
}

/// Consumer of telemetry samples on the PC link.
pub trait TelemetrySink {
    /// Serializes and transmits one sample.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Busy`] if the transport cannot take the sample
    /// yet; the caller retries with the same sample later.
    fn send(&mut self, sample: &TelemetrySample) -> Result<(), LinkError>;
}
