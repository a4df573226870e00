//! Mock platform implementations for host testing.
//!
//! Scripted inputs, recorded outputs, no hardware dependencies. The mock
//! time source lives with its trait in
//! [`crate::platform::traits::time`].

pub mod encoder;
pub mod link;
pub mod motor;

pub use encoder::MockEncoder;
pub use link::MockLink;
pub use motor::MockMotor;
