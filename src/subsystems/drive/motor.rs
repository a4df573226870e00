//! Motor output task
//!
//! Applies the effort shares to the motor drivers behind the enable and
//! abort flags. The output stage is never energized before the scheduler
//! is running and the operator raises the enable flag, so the robot cannot
//! lurch at power-up. Dropping enable or raising abort de-energizes both
//! motors and requests a controller reset so stale integral action cannot
//! kick when drive is re-enabled.

use crate::core::scheduler::{Task, TaskFault};
use crate::core::sync::Share;
use crate::platform::traits::motor::{MotorDriver, MotorError};

/// Shares consumed and produced by the motor task.
pub struct MotorShares<'a> {
    /// Left effort command from the velocity controller, percent
    pub effort_left: &'a Share<f32>,
    /// Right effort command from the velocity controller, percent
    pub effort_right: &'a Share<f32>,
    /// Operator enable flag
    pub enable: &'a Share<bool>,
    /// Abort flag; consumed (cleared) by this task after disabling
    pub abort: &'a Share<bool>,
    /// Controller reset request raised on every disable
    pub ctrl_reset: &'a Share<bool>,
}

/// Task-local lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Force a known-safe disabled output stage
    Init,
    /// Motors de-energized, waiting for the enable flag
    Disabled,
    /// Motors energized, applying effort commands every slice
    Running,
}

/// Periodic motor output task.
pub struct MotorTask<'a, M: MotorDriver> {
    shares: MotorShares<'a>,
    left: M,
    right: M,
    state: State,
}

impl<'a, M: MotorDriver> MotorTask<'a, M> {
    /// Creates the task; motors stay de-energized until the enable flag is
    /// raised while the scheduler dispatches.
    pub fn new(shares: MotorShares<'a>, left: M, right: M) -> Self {
        Self {
            shares,
            left,
            right,
            state: State::Init,
        }
    }

    /// Left motor driver, for inspection in tests.
    pub fn left(&self) -> &M {
        &self.left
    }

    /// Right motor driver, for inspection in tests.
    pub fn right(&self) -> &M {
        &self.right
    }

    fn disable_both(&mut self) -> Result<(), TaskFault> {
        self.left.disable().map_err(fault_from)?;
        self.right.disable().map_err(fault_from)?;
        Ok(())
    }
}

impl<M: MotorDriver> Task for MotorTask<'_, M> {
    fn step(&mut self, _now_us: u64) -> Result<(), TaskFault> {
        match self.state {
            State::Init => {
                self.disable_both()?;
                self.shares.abort.write(false);
                self.state = State::Disabled;
            }
            State::Disabled => {
                if self.shares.enable.read() {
                    self.left.enable().map_err(fault_from)?;
                    self.right.enable().map_err(fault_from)?;
                    self.state = State::Running;
                }
            }
            State::Running => {
                if !self.shares.enable.read() || self.shares.abort.read() {
                    self.disable_both()?;
                    self.shares.abort.write(false);
                    self.shares.ctrl_reset.write(true);
                    self.state = State::Disabled;
                } else {
                    self.left
                        .set_effort(self.shares.effort_left.read())
                        .map_err(fault_from)?;
                    self.right
                        .set_effort(self.shares.effort_right.read())
                        .map_err(fault_from)?;
                }
            }
        }
        Ok(())
    }
}

fn fault_from(error: MotorError) -> TaskFault {
    match error {
        MotorError::InvalidEffort => TaskFault::new("motor rejected effort command"),
        MotorError::HardwareFault => TaskFault::new("motor hardware fault"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::motor::MockMotor;

    struct Fixture {
        effort_left: Share<f32>,
        effort_right: Share<f32>,
        enable: Share<bool>,
        abort: Share<bool>,
        ctrl_reset: Share<bool>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                effort_left: Share::new(0.0),
                effort_right: Share::new(0.0),
                enable: Share::new(false),
                abort: Share::new(false),
                ctrl_reset: Share::new(false),
            }
        }

        fn task(&self) -> MotorTask<'_, MockMotor> {
            MotorTask::new(
                MotorShares {
                    effort_left: &self.effort_left,
                    effort_right: &self.effort_right,
                    enable: &self.enable,
                    abort: &self.abort,
                    ctrl_reset: &self.ctrl_reset,
                },
                MockMotor::new(),
                MockMotor::new(),
            )
        }
    }

    #[test]
    fn test_motors_stay_disabled_until_enable_flag() {
        let fx = Fixture::new();
        let mut task = fx.task();

        task.step(0).unwrap();
        task.step(10_000).unwrap();
        assert!(!task.left().enabled);
        assert!(!task.right().enabled);
    }

    #[test]
    fn test_enable_flag_energizes_and_applies_effort() {
        let fx = Fixture::new();
        let mut task = fx.task();
        task.step(0).unwrap();

        fx.enable.write(true);
        fx.effort_left.write(30.0);
        fx.effort_right.write(-30.0);

        // One slice to transition, one to apply
        task.step(10_000).unwrap();
        assert!(task.left().enabled);

        task.step(20_000).unwrap();
        assert_eq!(task.left().effort, 30.0);
        assert_eq!(task.right().effort, -30.0);
    }

    #[test]
    fn test_dropping_enable_disables_and_requests_reset() {
        let fx = Fixture::new();
        let mut task = fx.task();
        task.step(0).unwrap();
        fx.enable.write(true);
        task.step(10_000).unwrap();
        task.step(20_000).unwrap();

        fx.enable.write(false);
        task.step(30_000).unwrap();
        assert!(!task.left().enabled);
        assert!(fx.ctrl_reset.read());
    }

    #[test]
    fn test_abort_disables_and_clears_flag() {
        let fx = Fixture::new();
        let mut task = fx.task();
        task.step(0).unwrap();
        fx.enable.write(true);
        task.step(10_000).unwrap();

        fx.abort.write(true);
        task.step(20_000).unwrap();
        assert!(!task.left().enabled);
        assert!(!fx.abort.read());
        assert!(fx.ctrl_reset.read());

        // Enable still set: next slice re-energizes
        task.step(30_000).unwrap();
        assert!(task.left().enabled);
    }

    #[test]
    fn test_hardware_fault_surfaces_as_task_fault() {
        let fx = Fixture::new();
        let mut task = fx.task();
        task.step(0).unwrap();
        fx.enable.write(true);
        task.step(10_000).unwrap();

        task.left.fail_hardware = true;
        let fault = task.step(20_000).unwrap_err();
        assert_eq!(fault, TaskFault::new("motor hardware fault"));
    }
}
