//! Quadrature encoder abstraction.
//!
//! The encoder task consumes incremental motion through this trait. Each
//! read reports the tick deltas of both wheels and the elapsed time since
//! the previous read, which is everything the core needs for velocity
//! estimation and odometry; counter width, overflow handling, and timer
//! plumbing stay in the board support layer.

/// Incremental motion of both wheels since the previous read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderDelta {
    /// Signed tick count of the left wheel
    pub ticks_left: i32,
    /// Signed tick count of the right wheel
    pub ticks_right: i32,
    /// Time covered by this delta in microseconds
    pub elapsed_us: u64,
}

/// Interface to the wheel encoder pair.
pub trait EncoderDriver {
    /// Returns ticks accumulated per wheel and time elapsed since the last
    /// call. The first call after creation defines the baseline.
    fn read_delta(&mut self) -> EncoderDelta;
}
