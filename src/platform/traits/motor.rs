//! Motor driver abstraction.
//!
//! The drive subsystem commands motors exclusively through this trait; the
//! PWM/GPIO details live in the board support layer. Effort is a signed
//! percentage in [-100.0, +100.0] where the sign encodes direction.

/// Motor driver error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Effort value outside the [-100.0, +100.0] range
    InvalidEffort,
    /// Underlying PWM/GPIO hardware failed
    HardwareFault,
}

impl core::fmt::Display for MotorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MotorError::InvalidEffort => write!(f, "effort outside [-100, 100]"),
            MotorError::HardwareFault => write!(f, "motor hardware fault"),
        }
    }
}

/// Interface to one DC motor channel.
///
/// A disabled motor ignores effort commands at the hardware level; the
/// drive task never calls [`enable`](MotorDriver::enable) before the
/// scheduler has started and the operator has raised the enable flag, so
/// the robot cannot move at power-up.
pub trait MotorDriver {
    /// Applies a signed effort percentage in [-100.0, +100.0].
    ///
    /// # Errors
    ///
    /// Returns [`MotorError::InvalidEffort`] for out-of-range commands and
    /// [`MotorError::HardwareFault`] if the output stage fails.
    fn set_effort(&mut self, effort: f32) -> Result<(), MotorError>;

    /// Energizes the output stage.
    fn enable(&mut self) -> Result<(), MotorError>;

    /// De-energizes the output stage; the motor coasts.
    fn disable(&mut self) -> Result<(), MotorError>;
}
