//! Wheel odometry
//!
//! Dead-reckoning pose estimation from incremental wheel motion. The
//! integrator is purely numerical, with no external reference correcting
//! it, so drift grows without bound over very long runs; that is an
//! accepted limitation of the design, not a defect. Position updates use
//! the mid-step heading to cut integration bias on curved paths.

pub mod task;

pub use task::{OdometryShares, OdometryTask};

use libm::{cosf, fabsf, sinf};

use crate::parameters::ConfigError;

/// Wheel radius and wheel base of the chassis, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    /// Drive wheel radius
    pub wheel_radius: f32,
    /// Distance between the wheel contact points
    pub wheel_base: f32,
}

impl WheelGeometry {
    /// Builds a validated geometry.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGeometry`] unless both dimensions are strictly
    /// positive finite values.
    pub fn new(wheel_radius: f32, wheel_base: f32) -> Result<Self, ConfigError> {
        let geometry = Self {
            wheel_radius,
            wheel_base,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks both dimensions without consuming the geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = self.wheel_radius.is_finite()
            && self.wheel_radius > 0.0
            && self.wheel_base.is_finite()
            && self.wheel_base > 0.0;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidGeometry)
        }
    }
}

/// Accumulated pose estimate.
///
/// Mutated only by [`OdometryIntegrator::update`], once per call, and
/// cleared only by an explicit re-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    /// Absolute X position in meters
    pub x: f32,
    /// Absolute Y position in meters
    pub y: f32,
    /// Absolute heading in radians, wrapped to (-pi, pi]
    pub heading: f32,
    /// Total distance traveled in meters, direction-independent
    pub arc_length: f32,
}

/// Wraps an angle to the canonical (-pi, pi] range.
pub fn wrap_pi(angle: f32) -> f32 {
    const TWO_PI: f32 = 2.0 * core::f32::consts::PI;
    let mut wrapped = angle;
    while wrapped > core::f32::consts::PI {
        wrapped -= TWO_PI;
    }
    while wrapped <= -core::f32::consts::PI {
        wrapped += TWO_PI;
    }
    wrapped
}

/// Integrates incremental wheel rotation into an absolute pose.
#[derive(Debug, Clone)]
pub struct OdometryIntegrator {
    geometry: WheelGeometry,
    pose: Pose,
}

impl OdometryIntegrator {
    /// Creates an integrator at the origin with heading zero.
    pub fn new(geometry: WheelGeometry) -> Self {
        Self {
            geometry,
            pose: Pose::default(),
        }
    }

    /// Folds one step of wheel motion into the pose.
    ///
    /// `delta_left` and `delta_right` are the wheel rotation increments in
    /// radians since the previous call, assumed finite. The linear
    /// displacement is projected along the heading at the midpoint of the
    /// step (previous heading plus half the heading change), which removes
    /// the first-order bias a start-of-step projection accumulates on
    /// curved paths.
    pub fn update(&mut self, delta_left: f32, delta_right: f32) {
        let r = self.geometry.wheel_radius;
        let displacement = r * (delta_left + delta_right) / 2.0;
        let heading_change = r * (delta_right - delta_left) / self.geometry.wheel_base;

        let mid_heading = self.pose.heading + heading_change / 2.0;
        self.pose.x += displacement * cosf(mid_heading);
        self.pose.y += displacement * sinf(mid_heading);
        self.pose.heading = wrap_pi(self.pose.heading + heading_change);
        self.pose.arc_length += fabsf(displacement);
    }

    /// Current pose estimate.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Chassis geometry the integrator was built with.
    pub fn geometry(&self) -> WheelGeometry {
        self.geometry
    }

    /// Re-zeroes the pose to the origin. The only reset path.
    pub fn reset(&mut self) {
        self.pose = Pose::default();
    }
}
