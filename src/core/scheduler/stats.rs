//! Per-task runtime statistics
//!
//! Updated by the scheduler after every slice and queryable for monitoring.
//! Overruns are the load-bearing metric: a slice finishing at or after the
//! task's next deadline is recorded here rather than corrected, so a
//! misbehaving task shows up in telemetry instead of silently skewing the
//! schedule.

/// Runtime statistics for a single task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Last slice execution time in microseconds
    pub last_execution_us: u32,

    /// Average slice execution time in microseconds (exponential moving
    /// average with alpha = 0.1)
    pub avg_execution_us: u32,

    /// Maximum slice execution time observed in microseconds
    pub max_execution_us: u32,

    /// Number of slices that completed at or after the task's next deadline
    pub overruns: u32,

    /// Total number of completed slices
    pub execution_count: u64,
}

impl TaskStats {
    /// Records a completed slice of `execution_us` microseconds.
    pub fn record_execution(&mut self, execution_us: u32) {
        self.last_execution_us = execution_us;
        self.execution_count = self.execution_count.saturating_add(1);

        // EMA with alpha = 0.1 in fixed point: avg = (x + 9 * avg) / 10
        if self.avg_execution_us == 0 {
            self.avg_execution_us = execution_us;
        } else {
            self.avg_execution_us = (execution_us + 9 * self.avg_execution_us) / 10;
        }

        if execution_us > self.max_execution_us {
            self.max_execution_us = execution_us;
        }
    }

    /// Records that a slice finished past its next deadline.
    pub fn record_overrun(&mut self) {
        self.overruns = self.overruns.saturating_add(1);
    }

    /// Resets all statistics to their initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_execution_seeds_average() {
        let mut stats = TaskStats::default();
        stats.record_execution(1500);

        assert_eq!(stats.last_execution_us, 1500);
        assert_eq!(stats.avg_execution_us, 1500);
        assert_eq!(stats.max_execution_us, 1500);
        assert_eq!(stats.execution_count, 1);
    }

    #[test]
    fn test_average_uses_ema() {
        let mut stats = TaskStats::default();
        stats.record_execution(1500);
        stats.record_execution(1600);

        assert_eq!(stats.avg_execution_us, (1600 + 9 * 1500) / 10);
        assert_eq!(stats.last_execution_us, 1600);
        assert_eq!(stats.execution_count, 2);
    }

    #[test]
    fn test_max_tracks_peak() {
        let mut stats = TaskStats::default();
        stats.record_execution(1000);
        stats.record_execution(2500);
        stats.record_execution(1200);

        assert_eq!(stats.max_execution_us, 2500);
    }

    #[test]
    fn test_overrun_counter() {
        let mut stats = TaskStats::default();
        assert_eq!(stats.overruns, 0);

        stats.record_overrun();
        stats.record_overrun();
        assert_eq!(stats.overruns, 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut stats = TaskStats::default();
        stats.record_execution(1000);
        stats.record_overrun();

        stats.reset();
        assert_eq!(stats, TaskStats::default());
    }
}
