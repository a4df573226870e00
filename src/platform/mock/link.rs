//! Mock telemetry sink collecting sent samples.

use crate::platform::traits::link::{LinkError, TelemetrySink};
use crate::subsystems::telemetry::TelemetrySample;

/// Maximum number of samples the mock can absorb.
const SINK_LEN: usize = 256;

/// Mock telemetry sink for host tests.
///
/// Collects every accepted sample and can simulate a busy transport to
/// exercise the streaming task's retry path.
#[derive(Default)]
pub struct MockLink {
    /// Samples accepted so far, in send order
    pub sent: heapless::Vec<TelemetrySample, SINK_LEN>,
    /// When set, `send` reports the link as busy
    pub busy: bool,
}

impl MockLink {
    /// Creates an idle mock link.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for MockLink {
    fn send(&mut self, sample: &TelemetrySample) -> Result<(), LinkError> {
        if self.busy || self.sent.is_full() {
            return Err(LinkError::Busy);
        }
        let _ = self.sent.push(*sample);
        Ok(())
    }
}
