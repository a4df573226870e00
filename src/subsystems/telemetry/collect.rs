//! Telemetry collection task
//!
//! While the collection flag is raised, each slice snapshots the telemetry
//! shares into one [`TelemetrySample`] and pushes it onto the bounded
//! queue. A full queue ends the run: the sample is dropped and counted,
//! the done flag is raised, and collection disarms until the operator
//! starts the next run. Queue pressure is handled here, locally; it is
//! never an error that can reach the scheduler.

use crate::core::scheduler::{Task, TaskFault};
use crate::core::sync::{Queue, Share};
use crate::log_warn;
use crate::subsystems::telemetry::TelemetrySample;

/// Shares consumed and produced by the collector task.
pub struct CollectorShares<'a> {
    /// Sample timestamp from the encoder task, ms
    pub timestamp_ms: &'a Share<u32>,
    /// Left wheel setpoint, rad/s
    pub setpoint_left: &'a Share<f32>,
    /// Right wheel setpoint, rad/s
    pub setpoint_right: &'a Share<f32>,
    /// Measured left wheel velocity, rad/s
    pub velocity_left: &'a Share<f32>,
    /// Measured right wheel velocity, rad/s
    pub velocity_right: &'a Share<f32>,
    /// Left effort command, percent
    pub effort_left: &'a Share<f32>,
    /// Right effort command, percent
    pub effort_right: &'a Share<f32>,
    /// Absolute X, meters
    pub x: &'a Share<f32>,
    /// Absolute Y, meters
    pub y: &'a Share<f32>,
    /// Heading, radians
    pub heading: &'a Share<f32>,
    /// Arc length, meters
    pub arc_length: &'a Share<f32>,
    /// Collection armed flag; cleared by this task when the run ends
    pub col_start: &'a Share<bool>,
    /// Collection finished flag; raised when the queue fills
    pub col_done: &'a Share<bool>,
}

/// Periodic share-to-queue telemetry mover.
pub struct CollectorTask<'a, const N: usize> {
    shares: CollectorShares<'a>,
    queue: &'a Queue<TelemetrySample, N>,
    dropped: u32,
}

impl<'a, const N: usize> CollectorTask<'a, N> {
    /// Creates the task writing into `queue`.
    pub fn new(shares: CollectorShares<'a>, queue: &'a Queue<TelemetrySample, N>) -> Self {
        Self {
            shares,
            queue,
            dropped: 0,
        }
    }

    /// Number of samples dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn snapshot(&self) -> TelemetrySample {
        TelemetrySample {
            timestamp_ms: self.shares.timestamp_ms.read(),
            setpoint_left: self.shares.setpoint_left.read(),
            setpoint_right: self.shares.setpoint_right.read(),
            velocity_left: self.shares.velocity_left.read(),
            velocity_right: self.shares.velocity_right.read(),
            effort_left: self.shares.effort_left.read(),
            effort_right: self.shares.effort_right.read(),
            x: self.shares.x.read(),
            y: self.shares.y.read(),
            heading: self.shares.heading.read(),
            arc_length: self.shares.arc_length.read(),
        }
    }
}

impl<const N: usize> Task for CollectorTask<'_, N> {
    fn step(&mut self, _now_us: u64) -> Result<(), TaskFault> {
        if !self.shares.col_start.read() {
            return Ok(());
        }

        if !self.queue.push(self.snapshot()) {
            self.dropped = self.dropped.saturating_add(1);
            self.shares.col_done.write(true);
            self.shares.col_start.write(false);
            log_warn!("telemetry queue full, collection run ended");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        timestamp_ms: Share<u32>,
        setpoint_left: Share<f32>,
        setpoint_right: Share<f32>,
        velocity_left: Share<f32>,
        velocity_right: Share<f32>,
        effort_left: Share<f32>,
        effort_right: Share<f32>,
        x: Share<f32>,
        y: Share<f32>,
        heading: Share<f32>,
        arc_length: Share<f32>,
        col_start: Share<bool>,
        col_done: Share<bool>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                timestamp_ms: Share::new(0),
                setpoint_left: Share::new(0.0),
                setpoint_right: Share::new(0.0),
                velocity_left: Share::new(0.0),
                velocity_right: Share::new(0.0),
                effort_left: Share::new(0.0),
                effort_right: Share::new(0.0),
                x: Share::new(0.0),
                y: Share::new(0.0),
                heading: Share::new(0.0),
                arc_length: Share::new(0.0),
                col_start: Share::new(false),
                col_done: Share::new(false),
            }
        }

        fn task<'a, const N: usize>(
            &'a self,
            queue: &'a Queue<TelemetrySample, N>,
        ) -> CollectorTask<'a, N> {
            CollectorTask::new(
                CollectorShares {
                    timestamp_ms: &self.timestamp_ms,
                    setpoint_left: &self.setpoint_left,
                    setpoint_right: &self.setpoint_right,
                    velocity_left: &self.velocity_left,
                    velocity_right: &self.velocity_right,
                    effort_left: &self.effort_left,
                    effort_right: &self.effort_right,
                    x: &self.x,
                    y: &self.y,
                    heading: &self.heading,
                    arc_length: &self.arc_length,
                    col_start: &self.col_start,
                    col_done: &self.col_done,
                },
                queue,
            )
        }
    }

    #[test]
    fn test_idle_until_collection_armed() {
        let fx = Fixture::new();
        let queue: Queue<TelemetrySample, 4> = Queue::new();
        let mut task = fx.task(&queue);

        task.step(0).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_snapshots_current_share_values() {
        let fx = Fixture::new();
        let queue: Queue<TelemetrySample, 4> = Queue::new();
        let mut task = fx.task(&queue);

        fx.col_start.write(true);
        fx.timestamp_ms.write(120);
        fx.velocity_left.write(3.5);
        fx.effort_right.write(-42.0);
        fx.heading.write(0.7);
        task.step(0).unwrap();

        let sample = queue.pop().unwrap();
        assert_eq!(sample.timestamp_ms, 120);
        assert_eq!(sample.velocity_left, 3.5);
        assert_eq!(sample.effort_right, -42.0);
        assert_eq!(sample.heading, 0.7);
    }

    #[test]
    fn test_full_queue_ends_run_and_counts_drop() {
        let fx = Fixture::new();
        let queue: Queue<TelemetrySample, 2> = Queue::new();
        let mut task = fx.task(&queue);

        fx.col_start.write(true);
        task.step(0).unwrap();
        task.step(10_000).unwrap();
        assert!(queue.is_full());
        assert!(!fx.col_done.read());

        // Third push fails: run ends, drop counted, queue unchanged
        task.step(20_000).unwrap();
        assert_eq!(task.dropped(), 1);
        assert!(fx.col_done.read());
        assert!(!fx.col_start.read());
        assert_eq!(queue.len(), 2);

        // Disarmed now: further slices collect nothing
        task.step(30_000).unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(task.dropped(), 1);
    }
}
