//! Drive I/O subsystem.
//!
//! Two periodic tasks sit between the control loops and the hardware
//! traits: [`encoder::EncoderTask`] samples wheel motion and publishes
//! velocity and position shares, [`motor::MotorTask`] applies effort
//! commands behind the enable/abort flags.

pub mod encoder;
pub mod motor;

pub use encoder::{EncoderShares, EncoderTask};
pub use motor::{MotorShares, MotorTask};
