//! PI velocity control law
//!
//! One [`PiController`] per wheel. Encoder-derived velocity is noisy and
//! heavily quantized at 10 ms sampling, so integral action without windup
//! protection drifts monotonically once the output saturates, an observed
//! failure mode on this chassis, which is why integration is conditional
//! rather than merely clamped after the fact. `dt` must come from measured
//! elapsed time, not an assumed constant: dispatch jitter under the
//! cooperative scheduler makes slice-to-slice intervals uneven.

use crate::parameters::ConfigError;

/// Gains and output bounds for one PI controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiConfig {
    /// Proportional gain (>= 0)
    pub kp: f32,
    /// Integral gain (>= 0)
    pub ki: f32,
    /// Lower effort clamp
    pub effort_min: f32,
    /// Upper effort clamp
    pub effort_max: f32,
}

impl PiConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGain`] for negative or non-finite gains,
    /// [`ConfigError::InvalidEffortBounds`] when `effort_min >= effort_max`
    /// or a bound is non-finite.
    pub fn new(kp: f32, ki: f32, effort_min: f32, effort_max: f32) -> Result<Self, ConfigError> {
        let config = Self {
            kp,
            ki,
            effort_min,
            effort_max,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks gains and bounds without consuming the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.kp >= 0.0) || !(self.ki >= 0.0) {
            return Err(ConfigError::InvalidGain);
        }
        if !self.effort_min.is_finite()
            || !self.effort_max.is_finite()
            || self.effort_min >= self.effort_max
        {
            return Err(ConfigError::InvalidEffortBounds);
        }
        Ok(())
    }
}

/// Proportional-integral velocity controller for one wheel.
///
/// Persistent state is the integral accumulator plus the last setpoint and
/// output, all mutated only inside [`update`](PiController::update). State
/// lives for the whole powered-on session; [`reset`](PiController::reset)
/// is the only way to clear it.
#[derive(Debug, Clone)]
pub struct PiController {
    config: PiConfig,
    integrator: f32,
    last_setpoint: f32,
    last_output: f32,
}

impl PiController {
    /// Creates a controller with zeroed state.
    pub fn new(config: PiConfig) -> Self {
        Self {
            config,
            integrator: 0.0,
            last_setpoint: 0.0,
            last_output: 0.0,
        }
    }

    /// Computes the clamped effort for one control step.
    ///
    /// `dt` is the measured time since the previous call, in seconds.
    /// Integration is frozen while the unsaturated output already exceeds a
    /// bound and the error would push it further past that bound.
    pub fn update(&mut self, setpoint: f32, measured: f32, dt: f32) -> f32 {
        self.update_with_gain(setpoint, measured, dt, 1.0)
    }

    /// [`update`](PiController::update) with a multiplicative output gain,
    /// used for battery droop compensation. The gain scales the raw PI
    /// output before the final clamp, so compensation can never push effort
    /// outside the configured bounds.
    pub fn update_with_gain(&mut self, setpoint: f32, measured: f32, dt: f32, gain: f32) -> f32 {
        let error = setpoint - measured;
        self.last_setpoint = setpoint;

        // Anti-windup: integrate only while the resulting output would stay
        // inside the bounds, or the error is driving it back toward them.
        let candidate = self.integrator + error * dt;
        let unsaturated = (self.config.kp * error + self.config.ki * candidate) * gain;
        let pushing_high = unsaturated > self.config.effort_max && error > 0.0;
        let pushing_low = unsaturated < self.config.effort_min && error < 0.0;
        if !pushing_high && !pushing_low {
            self.integrator = candidate;
        }

        let raw = (self.config.kp * error + self.config.ki * self.integrator) * gain;
        let output = raw.clamp(self.config.effort_min, self.config.effort_max);
        self.last_output = output;
        output
    }

    /// Clears the integral accumulator and held outputs.
    pub fn reset(&mut self) {
        self.integrator = 0.0;
        self.last_setpoint = 0.0;
        self.last_output = 0.0;
    }

    /// Current integral accumulator value.
    pub fn integrator(&self) -> f32 {
        self.integrator
    }

    /// Setpoint of the most recent update.
    pub fn last_setpoint(&self) -> f32 {
        self.last_setpoint
    }

    /// Output of the most recent update.
    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    /// Controller configuration.
    pub fn config(&self) -> &PiConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> PiConfig {
        PiConfig::new(2.0, 1.0, -100.0, 100.0).unwrap()
    }

    #[test]
    fn test_config_rejects_negative_gains() {
        assert_eq!(
            PiConfig::new(-0.1, 1.0, -100.0, 100.0),
            Err(ConfigError::InvalidGain)
        );
        assert_eq!(
            PiConfig::new(1.0, -0.1, -100.0, 100.0),
            Err(ConfigError::InvalidGain)
        );
    }

    #[test]
    fn test_config_rejects_nan_gain() {
        assert_eq!(
            PiConfig::new(f32::NAN, 1.0, -100.0, 100.0),
            Err(ConfigError::InvalidGain)
        );
    }

    #[test]
    fn test_config_rejects_inverted_bounds() {
        assert_eq!(
            PiConfig::new(1.0, 1.0, 100.0, -100.0),
            Err(ConfigError::InvalidEffortBounds)
        );
        assert_eq!(
            PiConfig::new(1.0, 1.0, 50.0, 50.0),
            Err(ConfigError::InvalidEffortBounds)
        );
    }

    #[test]
    fn test_proportional_only_response() {
        let config = PiConfig::new(2.0, 0.0, -100.0, 100.0).unwrap();
        let mut pi = PiController::new(config);

        // error = 3, output = kp * error
        assert_eq!(pi.update(5.0, 2.0, 0.01), 6.0);
        // No integral action with ki = 0
        assert_eq!(pi.integrator(), 3.0 * 0.01);
    }

    #[test]
    fn test_integral_accumulates_over_steps() {
        let config = PiConfig::new(0.0, 10.0, -100.0, 100.0).unwrap();
        let mut pi = PiController::new(config);

        let out1 = pi.update(1.0, 0.0, 0.1);
        let out2 = pi.update(1.0, 0.0, 0.1);
        // Constant error of 1.0: integrator grows 0.1 per step
        assert!((out1 - 1.0).abs() < 1e-6);
        assert!((out2 - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_output_clamped_to_bounds() {
        let config = PiConfig::new(50.0, 0.0, -10.0, 10.0).unwrap();
        let mut pi = PiController::new(config);

        assert_eq!(pi.update(10.0, 0.0, 0.01), 10.0);
        assert_eq!(pi.update(-10.0, 0.0, 0.01), -10.0);
    }

    #[test]
    fn test_anti_windup_integrator_plateaus_when_saturated() {
        let config = PiConfig::new(1.0, 10.0, -20.0, 20.0).unwrap();
        let mut pi = PiController::new(config);

        // Large constant error saturates the output quickly
        for _ in 0..10 {
            pi.update(100.0, 0.0, 0.1);
        }
        let frozen = pi.integrator();

        // Further saturated steps must not grow the accumulator
        for _ in 0..100 {
            assert_eq!(pi.update(100.0, 0.0, 0.1), 20.0);
        }
        assert_eq!(pi.integrator(), frozen);
    }

    #[test]
    fn test_anti_windup_releases_when_error_reverses() {
        let config = PiConfig::new(1.0, 10.0, -20.0, 20.0).unwrap();
        let mut pi = PiController::new(config);

        for _ in 0..10 {
            pi.update(100.0, 0.0, 0.1);
        }
        let frozen = pi.integrator();

        // Error now drives the output back toward the bounds: integration
        // resumes even though the output may still be saturated
        pi.update(0.0, 100.0, 0.1);
        assert!(pi.integrator() < frozen);
    }

    #[test]
    fn test_update_is_deterministic() {
        let mut a = PiController::new(default_config());
        let mut b = PiController::new(default_config());

        let inputs = [
            (1.0, 0.2, 0.01),
            (1.5, 0.9, 0.012),
            (0.0, 1.1, 0.009),
            (-2.0, -1.0, 0.011),
        ];
        for (sp, fb, dt) in inputs {
            let out_a = a.update(sp, fb, dt);
            let out_b = b.update(sp, fb, dt);
            assert_eq!(out_a.to_bits(), out_b.to_bits());
        }
        assert_eq!(a.integrator().to_bits(), b.integrator().to_bits());
    }

    #[test]
    fn test_gain_scales_before_clamp() {
        let config = PiConfig::new(1.0, 0.0, -100.0, 100.0).unwrap();
        let mut pi = PiController::new(config);

        // error = 50, gain 1.5 -> 75, inside bounds
        assert_eq!(pi.update_with_gain(50.0, 0.0, 0.01, 1.5), 75.0);
        // error = 80, gain 1.5 -> 120, clamped
        assert_eq!(pi.update_with_gain(80.0, 0.0, 0.01, 1.5), 100.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut pi = PiController::new(default_config());
        pi.update(5.0, 0.0, 0.1);
        assert!(pi.integrator() != 0.0);

        pi.reset();
        assert_eq!(pi.integrator(), 0.0);
        assert_eq!(pi.last_output(), 0.0);
        assert_eq!(pi.last_setpoint(), 0.0);
    }

    #[test]
    fn test_state_accessors_track_last_update() {
        let mut pi = PiController::new(default_config());
        let out = pi.update(3.0, 1.0, 0.05);
        assert_eq!(pi.last_setpoint(), 3.0);
        assert_eq!(pi.last_output(), out);
    }
}
