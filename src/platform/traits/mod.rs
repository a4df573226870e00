//! Platform-agnostic trait abstractions.
//!
//! These traits are the only surface through which the control core touches
//! hardware: a time source for scheduling, motor and encoder drivers for the
//! drive subsystem, and a telemetry sink for the PC link. Board crates
//! implement them against real peripherals; [`crate::platform::mock`]
//! implements them for host tests.

pub mod encoder;
pub mod link;
pub mod motor;
pub mod time;

pub use encoder::{EncoderDelta, EncoderDriver};
pub use link::{LinkError, TelemetrySink};
pub use motor::{MotorDriver, MotorError};
pub use time::{MockTime, TimeSource};
