//! Closed-loop velocity control.
//!
//! [`pi`] holds the per-wheel PI control law, [`droop`] the battery droop
//! compensation, and [`task`] the periodic task that ties them to the
//! steering correction and velocity feedback shares.

pub mod droop;
pub mod pi;
pub mod task;

pub use droop::DroopCompensator;
pub use pi::{PiConfig, PiController};
pub use task::{VelocityControlTask, VelocityShares};
