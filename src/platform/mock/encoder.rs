//! Mock encoder driver fed from a script of deltas.

use heapless::Deque;

use crate::platform::traits::encoder::{EncoderDelta, EncoderDriver};

/// Maximum number of scripted deltas.
const SCRIPT_LEN: usize = 128;

/// Mock encoder pair for host tests.
///
/// Reads pop scripted deltas in order. When the script runs out, reads
/// return the configured steady-state delta, which makes "wheels spinning
/// at a constant rate" the default long-run behavior.
pub struct MockEncoder {
    script: Deque<EncoderDelta, SCRIPT_LEN>,
    steady: EncoderDelta,
}

impl MockEncoder {
    /// Creates a mock that reports no motion until scripted otherwise.
    pub fn new() -> Self {
        Self {
            script: Deque::new(),
            steady: EncoderDelta {
                ticks_left: 0,
                ticks_right: 0,
                elapsed_us: 10_000,
            },
        }
    }

    /// Queues one scripted delta; reads consume the script in FIFO order.
    pub fn push_delta(&mut self, delta: EncoderDelta) {
        let _ = self.script.push_back(delta);
    }

    /// Sets the delta returned once the script is exhausted.
    pub fn set_steady(&mut self, delta: EncoderDelta) {
        self.steady = delta;
    }
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderDriver for MockEncoder {
    fn read_delta(&mut self) -> EncoderDelta {
        self.script.pop_front().unwrap_or(self.steady)
    }
}
