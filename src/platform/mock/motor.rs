//! Mock motor driver recording every command it receives.

use crate::platform::traits::motor::{MotorDriver, MotorError};

/// Maximum number of effort commands kept for inspection.
const HISTORY_LEN: usize = 64;

/// Mock motor for host tests.
///
/// Records the enable state and every effort applied while enabled, and can
/// be told to fail at the hardware level to exercise fault paths.
#[derive(Debug, Default)]
pub struct MockMotor {
    /// Whether the output stage is energized
    pub enabled: bool,
    /// Most recent effort command
    pub effort: f32,
    /// Effort commands in application order (recording stops once full)
    pub history: heapless::Vec<f32, HISTORY_LEN>,
    /// When set, every operation reports a hardware fault
    pub fail_hardware: bool,
}

impl MockMotor {
    /// Creates a disabled mock motor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotorDriver for MockMotor {
    fn set_effort(&mut self, effort: f32) -> Result<(), MotorError> {
        if self.fail_hardware {
            return Err(MotorError::HardwareFault);
        }
        if !(-100.0..=100.0).contains(&effort) {
            return Err(MotorError::InvalidEffort);
        }
        self.effort = effort;
        let _ = self.history.push(effort);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), MotorError> {
        if self.fail_hardware {
            return Err(MotorError::HardwareFault);
        }
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), MotorError> {
        if self.fail_hardware {
            return Err(MotorError::HardwareFault);
        }
        self.enabled = false;
        self.effort = 0.0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_efforts_in_order() {
        let mut motor = MockMotor::new();
        motor.enable().unwrap();
        motor.set_effort(10.0).unwrap();
        motor.set_effort(-25.0).unwrap();

        assert_eq!(motor.effort, -25.0);
        assert_eq!(motor.history.as_slice(), &[10.0, -25.0]);
    }

    #[test]
    fn rejects_out_of_range_effort() {
        let mut motor = MockMotor::new();
        assert_eq!(motor.set_effort(150.0), Err(MotorError::InvalidEffort));
        assert_eq!(motor.set_effort(-100.5), Err(MotorError::InvalidEffort));
        assert!(motor.history.is_empty());
    }

    #[test]
    fn disable_clears_effort() {
        let mut motor = MockMotor::new();
        motor.enable().unwrap();
        motor.set_effort(40.0).unwrap();
        motor.disable().unwrap();

        assert!(!motor.enabled);
        assert_eq!(motor.effort, 0.0);
    }

    #[test]
    fn hardware_fault_propagates() {
        let mut motor = MockMotor::new();
        motor.fail_hardware = true;
        assert_eq!(motor.enable(), Err(MotorError::HardwareFault));
        assert_eq!(motor.set_effort(1.0), Err(MotorError::HardwareFault));
    }
}
