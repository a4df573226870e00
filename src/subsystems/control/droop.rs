//! Battery droop compensation
//!
//! Motor authority drops as the pack sags under load; scaling the
//! controller output by `v_nominal / v_measured` keeps the effective drive
//! voltage close to what the gains were tuned for. The gain multiplies the
//! raw PI output before the final clamp, so compensation never widens the
//! effort bounds.

use crate::log_warn;
use crate::parameters::ConfigError;

/// Voltages at or below this are treated as a disconnected or invalid
/// sense line; compensation backs off to unity rather than dividing by a
/// junk reading.
const MIN_VALID_VOLTAGE: f32 = 0.5;

/// Computes a droop-compensation gain from the measured pack voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroopCompensator {
    v_nominal: f32,
}

impl DroopCompensator {
    /// Creates a compensator for the given nominal pack voltage.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidNominalVoltage`] if `v_nominal` is not a
    /// positive finite value.
    pub fn new(v_nominal: f32) -> Result<Self, ConfigError> {
        if !v_nominal.is_finite() || v_nominal <= 0.0 {
            return Err(ConfigError::InvalidNominalVoltage);
        }
        Ok(Self { v_nominal })
    }

    /// Gain to apply to the controller output for a measured voltage.
    ///
    /// Returns `v_nominal / v_measured`, or `1.0` when the measurement is
    /// at or below the validity floor.
    pub fn gain(&self, v_measured: f32) -> f32 {
        if !(v_measured > MIN_VALID_VOLTAGE) {
            log_warn!("battery voltage reading invalid, droop compensation off");
            return 1.0;
        }
        self.v_nominal / v_measured
    }
}
