//! Encoder sampling task
//!
//! Each slice reads the incremental tick counts from the encoder driver,
//! converts them to wheel radians, and publishes velocity and accumulated
//! position shares for the control and odometry tasks. Velocity comes from
//! the driver-reported elapsed time, not the nominal task period, so
//! dispatch jitter does not bias the estimate.

use core::f32::consts::TAU;

use crate::core::scheduler::{Task, TaskFault};
use crate::core::sync::Share;
use crate::platform::traits::encoder::EncoderDriver;

/// Shares produced by the encoder task.
pub struct EncoderShares<'a> {
    /// Left wheel velocity, rad/s
    pub velocity_left: &'a Share<f32>,
    /// Right wheel velocity, rad/s
    pub velocity_right: &'a Share<f32>,
    /// Accumulated left wheel angle since start, radians
    pub position_left: &'a Share<f32>,
    /// Accumulated right wheel angle since start, radians
    pub position_right: &'a Share<f32>,
    /// Sample timestamp, milliseconds since scheduler start
    pub timestamp_ms: &'a Share<u32>,
}

/// Task-local lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Discard the first delta to establish the driver baseline
    Init,
    /// Publish velocity and position every slice
    Running,
}

/// Periodic wheel motion sampling task.
pub struct EncoderTask<'a, E: EncoderDriver> {
    shares: EncoderShares<'a>,
    encoder: E,
    rad_per_tick: f32,
    position_left: f32,
    position_right: f32,
    state: State,
}

impl<'a, E: EncoderDriver> EncoderTask<'a, E> {
    /// Creates the task for an encoder with `counts_per_rev` quadrature
    /// counts per wheel revolution.
    pub fn new(shares: EncoderShares<'a>, encoder: E, counts_per_rev: u32) -> Self {
        Self {
            shares,
            encoder,
            rad_per_tick: TAU / counts_per_rev as f32,
            position_left: 0.0,
            position_right: 0.0,
            state: State::Init,
        }
    }

    /// Encoder driver, for inspection in tests.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }
}

impl<E: EncoderDriver> Task for EncoderTask<'_, E> {
    fn step(&mut self, now_us: u64) -> Result<(), TaskFault> {
        match self.state {
            State::Init => {
                // Whatever accumulated before start is baseline, not motion
                let _ = self.encoder.read_delta();
                self.state = State::Running;
            }
            State::Running => {
                let delta = self.encoder.read_delta();
                let delta_left = delta.ticks_left as f32 * self.rad_per_tick;
                let delta_right = delta.ticks_right as f32 * self.rad_per_tick;

                let (velocity_left, velocity_right) = if delta.elapsed_us > 0 {
                    let scale = 1_000_000.0 / delta.elapsed_us as f32;
                    (delta_left * scale, delta_right * scale)
                } else {
                    (0.0, 0.0)
                };

                self.position_left += delta_left;
                self.position_right += delta_right;

                self.shares.velocity_left.write(velocity_left);
                self.shares.velocity_right.write(velocity_right);
                self.shares.position_left.write(self.position_left);
                self.shares.position_right.write(self.position_right);
                self.shares.timestamp_ms.write((now_us / 1_000) as u32);
            }
        }
        Ok(())
    }
}
