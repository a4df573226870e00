//! Robot configuration
//!
//! Every tunable of the control core (task timing, control gains and
//! bounds, wheel geometry, encoder resolution) is an explicit field of
//! [`RobotConfig`], validated once at construction. A bad value is a fatal
//! configuration error reported before the scheduler begins dispatch; no
//! component re-validates at runtime.

use crate::subsystems::control::pi::PiConfig;
use crate::subsystems::odometry::WheelGeometry;

/// Errors from validating configuration at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A control gain is negative or non-finite
    InvalidGain,
    /// Effort bounds are non-finite or min >= max
    InvalidEffortBounds,
    /// Wheel radius or wheel base is not strictly positive
    InvalidGeometry,
    /// Encoder counts per revolution is zero
    InvalidCountsPerRev,
    /// Nominal battery voltage is not strictly positive
    InvalidNominalVoltage,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidGain => write!(f, "control gains must be finite and >= 0"),
            ConfigError::InvalidEffortBounds => {
                write!(f, "effort bounds must be finite with min < max")
            }
            ConfigError::InvalidGeometry => {
                write!(f, "wheel radius and wheel base must be positive")
            }
            ConfigError::InvalidCountsPerRev => {
                write!(f, "encoder counts per revolution must be nonzero")
            }
            ConfigError::InvalidNominalVoltage => {
                write!(f, "nominal battery voltage must be positive")
            }
        }
    }
}

/// Dispatch interval and precedence for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    /// Period between runs in microseconds (0 = run whenever ready)
    pub period_us: u64,
    /// Dispatch precedence, higher runs first
    pub priority: u8,
}

/// Full configuration of the control core.
///
/// The defaults describe the Romi chassis: 35 mm wheel radius, 141 mm track
/// width, 1440-count encoders, a six-cell NiMH pack, and the task timing the
/// robot runs with (drive and control at 100 Hz, streaming at 50 Hz,
/// collection at 100 Hz).
#[derive(Debug, Clone, Copy)]
pub struct RobotConfig {
    /// Encoder sampling task timing
    pub encoder_task: TaskTiming,
    /// Motor output task timing
    pub motor_task: TaskTiming,
    /// Velocity control task timing
    pub velocity_task: TaskTiming,
    /// Odometry integration task timing
    pub odometry_task: TaskTiming,
    /// Telemetry collection task timing
    pub collector_task: TaskTiming,
    /// Telemetry streaming task timing
    pub stream_task: TaskTiming,

    /// PI gains and effort bounds, shared by both wheel controllers
    pub pi: PiConfig,
    /// Wheel radius and wheel base used by odometry and setpoint mixing
    pub geometry: WheelGeometry,
    /// Quadrature counts per wheel revolution
    pub counts_per_rev: u32,
    /// Nominal battery voltage for droop compensation
    pub v_nominal: f32,
    /// Control-task gap beyond which the controllers hold their last output
    /// instead of integrating across the pause, in microseconds
    pub max_control_gap_us: u64,
}

impl RobotConfig {
    /// Validates every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pi.validate()?;
        self.geometry.validate()?;
        if self.counts_per_rev == 0 {
            return Err(ConfigError::InvalidCountsPerRev);
        }
        if !(self.v_nominal > 0.0) {
            return Err(ConfigError::InvalidNominalVoltage);
        }
        Ok(())
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            encoder_task: TaskTiming {
                period_us: 10_000,
                priority: 4,
            },
            motor_task: TaskTiming {
                period_us: 10_000,
                priority: 3,
            },
            velocity_task: TaskTiming {
                period_us: 10_000,
                priority: 3,
            },
            odometry_task: TaskTiming {
                period_us: 10_000,
                priority: 2,
            },
            collector_task: TaskTiming {
                period_us: 10_000,
                priority: 2,
            },
            stream_task: TaskTiming {
                period_us: 20_000,
                priority: 1,
            },
            pi: PiConfig {
                kp: 4.0,
                ki: 20.0,
                effort_min: -100.0,
                effort_max: 100.0,
            },
            geometry: WheelGeometry {
                wheel_radius: 0.035,
                wheel_base: 0.141,
            },
            counts_per_rev: 1440,
            v_nominal: 9.6,
            max_control_gap_us: 1_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RobotConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_counts_per_rev_rejected() {
        let mut config = RobotConfig::default();
        config.counts_per_rev = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCountsPerRev));
    }

    #[test]
    fn test_nonpositive_nominal_voltage_rejected() {
        let mut config = RobotConfig::default();
        config.v_nominal = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidNominalVoltage));
    }

    #[test]
    fn test_bad_gains_surface_through_validate() {
        let mut config = RobotConfig::default();
        config.pi.kp = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidGain));
    }

    #[test]
    fn test_bad_geometry_surfaces_through_validate() {
        let mut config = RobotConfig::default();
        config.geometry.wheel_base = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidGeometry));
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            format!("{}", ConfigError::InvalidEffortBounds),
            "effort bounds must be finite with min < max"
        );
    }
}
