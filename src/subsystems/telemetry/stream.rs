//! Telemetry streaming task
//!
//! Drains the sample queue into the telemetry sink once the stream flag is
//! raised. Draining is bounded per slice so a deep queue cannot starve the
//! control tasks, and a busy sink leaves the current sample queued for the
//! next slice, so nothing is lost between the queue and the link.

use crate::core::scheduler::{Task, TaskFault};
use crate::core::sync::{Queue, Share};
use crate::platform::traits::link::{LinkError, TelemetrySink};
use crate::subsystems::telemetry::TelemetrySample;

/// Samples handed to the sink in one slice, at most.
const DRAIN_BATCH: usize = 8;

/// Shares consumed and produced by the streaming task.
pub struct StreamShares<'a> {
    /// Stream request flag; cleared by this task when the queue is drained
    pub stream_data: &'a Share<bool>,
    /// Collection finished flag; cleared once the run has been streamed
    pub col_done: &'a Share<bool>,
}

/// Task-local lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the stream request flag
    Idle,
    /// Handing queued samples to the sink
    Draining,
}

/// Queue-to-link streaming task.
pub struct StreamTask<'a, S: TelemetrySink, const N: usize> {
    shares: StreamShares<'a>,
    queue: &'a Queue<TelemetrySample, N>,
    sink: S,
    state: State,
}

impl<'a, S: TelemetrySink, const N: usize> StreamTask<'a, S, N> {
    /// Creates the task draining `queue` into `sink`.
    pub fn new(
        shares: StreamShares<'a>,
        queue: &'a Queue<TelemetrySample, N>,
        sink: S,
    ) -> Self {
        Self {
            shares,
            queue,
            sink,
            state: State::Idle,
        }
    }

    /// Telemetry sink, for inspection in tests.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable telemetry sink access, for tests toggling link state.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: TelemetrySink, const N: usize> Task for StreamTask<'_, S, N> {
    fn step(&mut self, _now_us: u64) -> Result<(), TaskFault> {
        match self.state {
            State::Idle => {
                if self.shares.stream_data.read() {
                    self.state = State::Draining;
                }
            }
            State::Draining => {
                for _ in 0..DRAIN_BATCH {
                    let Some(sample) = self.queue.peek() else {
                        // Run fully streamed: disarm and re-arm for the next
                        self.shares.stream_data.write(false);
                        self.shares.col_done.write(false);
                        self.state = State::Idle;
                        break;
                    };
                    match self.sink.send(&sample) {
                        Ok(()) => {
                            let _ = self.queue.pop();
                        }
                        // Busy link: retry the same sample next slice
                        Err(LinkError::Busy) => break,
                    }
                }
            }
        }
        Ok(())
    }
}
