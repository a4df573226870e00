//! Telemetry collection and streaming.
//!
//! Samples flow Shares → [`collect::CollectorTask`] → bounded queue →
//! [`stream::StreamTask`] → [`TelemetrySink`](crate::platform::traits::link::TelemetrySink).
//! The queue is the only stage allowed to apply back-pressure: a full queue
//! drops the newest sample and counts the drop, it never stalls a control
//! task.

pub mod collect;
pub mod stream;

pub use collect::{CollectorShares, CollectorTask};
pub use stream::{StreamShares, StreamTask};

/// Default capacity of the telemetry sample queue, sized for one
/// collection run at the 100 Hz collection rate.
pub const MAX_SAMPLES: usize = 250;

/// One telemetry record: control state and pose at a single timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetrySample {
    /// Sample timestamp, milliseconds since scheduler start
    pub timestamp_ms: u32,
    /// Left wheel velocity setpoint, rad/s
    pub setpoint_left: f32,
    /// Right wheel velocity setpoint, rad/s
    pub setpoint_right: f32,
    /// Measured left wheel velocity, rad/s
    pub velocity_left: f32,
    /// Measured right wheel velocity, rad/s
    pub velocity_right: f32,
    /// Left effort command, percent
    pub effort_left: f32,
    /// Right effort command, percent
    pub effort_right: f32,
    /// Absolute X position, meters
    pub x: f32,
    /// Absolute Y position, meters
    pub y: f32,
    /// Heading, radians in (-pi, pi]
    pub heading: f32,
    /// Total arc length, meters
    pub arc_length: f32,
}
