//! Velocity control task
//!
//! Periodic task closing the wheel-velocity loops. Each slice reads the
//! externally produced steering correction and commanded base speed,
//! derives per-wheel setpoints, runs both PI controllers against the
//! measured velocities with the actually elapsed `dt`, scales by the
//! battery droop gain, and publishes the resulting efforts for the motor
//! task. The only coupling to the line-follow heuristic is the steering
//! correction share.

use crate::core::scheduler::{Task, TaskFault};
use crate::core::sync::Share;
use crate::subsystems::control::droop::DroopCompensator;
use crate::subsystems::control::pi::{PiConfig, PiController};
use crate::subsystems::odometry::WheelGeometry;

/// Shares consumed and produced by the velocity control task.
pub struct VelocityShares<'a> {
    /// Steering correction from the line follower, rad/s of commanded yaw
    pub steering: &'a Share<f32>,
    /// Commanded base forward speed, rad/s per wheel
    pub base_speed: &'a Share<f32>,
    /// Measured left wheel velocity, rad/s
    pub velocity_left: &'a Share<f32>,
    /// Measured right wheel velocity, rad/s
    pub velocity_right: &'a Share<f32>,
    /// Measured battery voltage from the sense collaborator
    pub battery_v: &'a Share<f32>,
    /// Computed left wheel setpoint, rad/s (published for telemetry)
    pub setpoint_left: &'a Share<f32>,
    /// Computed right wheel setpoint, rad/s (published for telemetry)
    pub setpoint_right: &'a Share<f32>,
    /// Left effort command, percent
    pub effort_left: &'a Share<f32>,
    /// Right effort command, percent
    pub effort_right: &'a Share<f32>,
    /// Operator enable flag
    pub enable: &'a Share<bool>,
    /// Controller reset request raised by the motor task on disable
    pub ctrl_reset: &'a Share<bool>,
}

/// Closed-loop velocity control task.
pub struct VelocityControlTask<'a> {
    shares: VelocityShares<'a>,
    left: PiController,
    right: PiController,
    droop: DroopCompensator,
    wheel_base: f32,
    max_gap_us: u64,
    last_update_us: Option<u64>,
}

impl<'a> VelocityControlTask<'a> {
    /// Creates the task with one controller per wheel.
    ///
    /// `droop` comes pre-validated; `pi` gains apply to both wheels, which
    /// share a motor/gearbox part and are tuned together.
    pub fn new(
        shares: VelocityShares<'a>,
        pi: PiConfig,
        droop: DroopCompensator,
        geometry: WheelGeometry,
        max_gap_us: u64,
    ) -> Self {
        Self {
            shares,
            left: PiController::new(pi),
            right: PiController::new(pi),
            droop,
            wheel_base: geometry.wheel_base,
            max_gap_us,
            last_update_us: None,
        }
    }

    /// Left wheel controller, for inspection in tests.
    pub fn left(&self) -> &PiController {
        &self.left
    }

    /// Right wheel controller, for inspection in tests.
    pub fn right(&self) -> &PiController {
        &self.right
    }

    /// Maps the yaw-rate correction onto per-wheel setpoints.
    ///
    /// Positive correction turns left: the left wheel slows and the right
    /// speeds up by `correction * wheel_base / 2` each.
    fn setpoints(&self, base: f32, correction: f32) -> (f32, f32) {
        let differential = correction * self.wheel_base / 2.0;
        (base - differential, base + differential)
    }
}

impl Task for VelocityControlTask<'_> {
    fn step(&mut self, now_us: u64) -> Result<(), TaskFault> {
        if self.shares.ctrl_reset.read() {
            self.left.reset();
            self.right.reset();
            self.shares.ctrl_reset.write(false);
            self.last_update_us = None;
        }

        if !self.shares.enable.read() {
            self.shares.effort_left.write(0.0);
            self.shares.effort_right.write(0.0);
            self.last_update_us = None;
            return Ok(());
        }

        let Some(last) = self.last_update_us else {
            // First slice after enable only establishes the dt baseline
            self.last_update_us = Some(now_us);
            return Ok(());
        };
        let gap_us = now_us.saturating_sub(last);
        self.last_update_us = Some(now_us);

        if gap_us > self.max_gap_us {
            // Task was starved or paused: hold the previous efforts instead
            // of integrating across the gap
            self.shares.effort_left.write(self.left.last_output());
            self.shares.effort_right.write(self.right.last_output());
            return Ok(());
        }

        let dt = gap_us as f32 / 1_000_000.0;
        let (sp_left, sp_right) =
            self.setpoints(self.shares.base_speed.read(), self.shares.steering.read());
        let gain = self.droop.gain(self.shares.battery_v.read());

        let effort_left =
            self.left
                .update_with_gain(sp_left, self.shares.velocity_left.read(), dt, gain);
        let effort_right =
            self.right
                .update_with_gain(sp_right, self.shares.velocity_right.read(), dt, gain);

        self.shares.setpoint_left.write(sp_left);
        self.shares.setpoint_right.write(sp_right);
        self.shares.effort_left.write(effort_left);
        self.shares.effort_right.write(effort_right);
        Ok(())
    }
}
