//! Time abstraction for platform-agnostic timing.
//!
//! The scheduler and control tasks never read a hardware timer directly;
//! they go through [`TimeSource`] so the same code runs against the board
//! timer in firmware and against [`MockTime`] in host tests.

use core::cell::Cell;

/// Platform-agnostic monotonic time source.
///
/// # Example
///
/// ```
/// use romi_trace::platform::traits::time::{MockTime, TimeSource};
///
/// fn due<T: TimeSource>(time: &T, deadline_us: u64) -> bool {
///     time.now_us() >= deadline_us
/// }
///
/// let time = MockTime::new();
/// time.advance(5_000);
/// assert!(due(&time, 5_000));
/// ```
pub trait TimeSource {
    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference in the "future" reads as
    /// zero elapsed rather than wrapping.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source with controllable advancement for deterministic tests.
///
/// # Example
///
/// ```
/// use romi_trace::platform::traits::time::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// assert_eq!(time.now_us(), 0);
///
/// time.advance(1_000);
/// assert_eq!(time.now_us(), 1_000);
/// assert_eq!(time.now_ms(), 1);
/// ```
#[derive(Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a mock clock starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a mock clock starting at the given time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the clock to an absolute time.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the clock by the given amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_starts_at_zero() {
        let time = MockTime::new();
        assert_eq!(time.now_us(), 0);
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn mock_time_with_initial() {
        let time = MockTime::with_initial(2_500_000);
        assert_eq!(time.now_us(), 2_500_000);
        assert_eq!(time.now_ms(), 2500);
    }

    #[test]
    fn mock_time_set_and_advance() {
        let time = MockTime::new();
        time.set(1_000);
        assert_eq!(time.now_us(), 1_000);

        time.advance(500);
        assert_eq!(time.now_us(), 1_500);
    }

    #[test]
    fn mock_time_ms_rounds_down() {
        let time = MockTime::new();
        time.set(1_999);
        assert_eq!(time.now_ms(), 1);
    }

    #[test]
    fn elapsed_since_saturates() {
        let time = MockTime::new();
        time.set(1_000);
        assert_eq!(time.elapsed_since(400), 600);
        // Future reference saturates to zero
        assert_eq!(time.elapsed_since(5_000), 0);
    }
}
