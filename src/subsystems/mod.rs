//! Robot subsystems: drive I/O, velocity control, odometry, telemetry.

pub mod control;
pub mod drive;
pub mod odometry;
pub mod telemetry;
