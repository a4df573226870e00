//! Odometry task
//!
//! Periodic task folding wheel motion into the pose estimate. It derives
//! per-step increments from the accumulated wheel-angle shares rather than
//! consuming the raw per-sample deltas, so running at a different rate than
//! the encoder task neither drops nor double-counts motion: with
//! latest-value shares, the difference since the last slice is exactly the
//! motion to integrate.

use crate::core::scheduler::{Task, TaskFault};
use crate::core::sync::Share;
use crate::subsystems::odometry::OdometryIntegrator;

/// Shares consumed and produced by the odometry task.
pub struct OdometryShares<'a> {
    /// Accumulated left wheel angle from the encoder task, radians
    pub position_left: &'a Share<f32>,
    /// Accumulated right wheel angle from the encoder task, radians
    pub position_right: &'a Share<f32>,
    /// Published absolute X, meters
    pub x: &'a Share<f32>,
    /// Published absolute Y, meters
    pub y: &'a Share<f32>,
    /// Published heading, radians in (-pi, pi]
    pub heading: &'a Share<f32>,
    /// Published total arc length, meters
    pub arc_length: &'a Share<f32>,
    /// Re-zero request; pose resets at the next slice and the flag clears
    pub zero_request: &'a Share<bool>,
}

/// Task-local lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Capture the wheel-angle baseline without integrating
    Init,
    /// Integrate the increment since the previous slice
    Running,
}

/// Dead-reckoning pose estimation task.
pub struct OdometryTask<'a> {
    shares: OdometryShares<'a>,
    integrator: OdometryIntegrator,
    prev_left: f32,
    prev_right: f32,
    state: State,
}

impl<'a> OdometryTask<'a> {
    /// Creates the task; the first slice establishes the motion baseline.
    pub fn new(shares: OdometryShares<'a>, integrator: OdometryIntegrator) -> Self {
        Self {
            shares,
            integrator,
            prev_left: 0.0,
            prev_right: 0.0,
            state: State::Init,
        }
    }

    /// Integrator, for inspection in tests.
    pub fn integrator(&self) -> &OdometryIntegrator {
        &self.integrator
    }

    fn publish(&self) {
        let pose = self.integrator.pose();
        self.shares.x.write(pose.x);
        self.shares.y.write(pose.y);
        self.shares.heading.write(pose.heading);
        self.shares.arc_length.write(pose.arc_length);
    }
}

impl Task for OdometryTask<'_> {
    fn step(&mut self, _now_us: u64) -> Result<(), TaskFault> {
        if self.shares.zero_request.read() {
            self.integrator.reset();
            self.prev_left = self.shares.position_left.read();
            self.prev_right = self.shares.position_right.read();
            self.shares.zero_request.write(false);
            self.publish();
            return Ok(());
        }

        match self.state {
            State::Init => {
                self.prev_left = self.shares.position_left.read();
                self.prev_right = self.shares.position_right.read();
                self.publish();
                self.state = State::Running;
            }
            State::Running => {
                let left = self.shares.position_left.read();
                let right = self.shares.position_right.read();
                self.integrator
                    .update(left - self.prev_left, right - self.prev_right);
                self.prev_left = left;
                self.prev_right = right;
                self.publish();
            }
        }
        Ok(())
    }
}
