//! Cooperative priority scheduler
//!
//! The scheduler owns a fixed set of tasks and is the sole arbiter of when a
//! task may run. Dispatch is cooperative: a selected task executes one
//! bounded slice to completion before control returns to the scheduler, so
//! there is no preemption and no lock discipline: shared state moves
//! between tasks through [`Share`](crate::core::sync::Share) and
//! [`Queue`](crate::core::sync::Queue) without mutexes. A task that fails to
//! bound its own slice starves every lower-priority task; that is the
//! contract, not a recoverable condition.
//!
//! # Dispatch
//!
//! Each [`Scheduler::run_once`] pass computes the current time, selects the
//! highest-priority task whose deadline has elapsed (ties broken by earliest
//! deadline, then registration order), runs one slice, and advances the
//! task's deadline by its period. Deadlines advance from their previous
//! value, never from "now", so overruns do not make the schedule drift; an
//! overrun is counted in [`TaskStats`] and the task is simply ready again.
//!
//! # Components
//!
//! - [`types`]: task configuration, lifecycle state, fault types
//! - [`stats`]: per-task execution statistics
//! - [`Task`], [`TaskSet`], [`Scheduler`]: the dispatch machinery

pub mod stats;
pub mod types;

pub use stats::TaskStats;
pub use types::{SchedulerError, TaskConfig, TaskFault, TaskId, TaskState};

use crate::platform::traits::time::TimeSource;
use crate::{log_error, log_info, log_warn};

/// Maximum number of tasks a [`TaskSet`] can hold.
pub const MAX_TASKS: usize = 16;

/// A unit of periodic work dispatched by the scheduler.
///
/// `step` performs one bounded slice and returns. Long-running work is
/// expressed as an explicit state machine: persistent struct fields carry
/// state across slices and `step` resumes from wherever the previous slice
/// left off. Returning `Err` is terminal: the scheduler moves the task to
/// [`TaskState::Faulted`] and never dispatches it again.
pub trait Task {
    /// Runs one bounded slice of work at scheduler time `now_us`.
    fn step(&mut self, now_us: u64) -> Result<(), TaskFault>;
}

/// Scheduler-owned record for one registered task.
struct TaskSlot<'a> {
    config: TaskConfig,
    state: TaskState,
    deadline_us: u64,
    stats: TaskStats,
    last_fault: Option<TaskFault>,
    task: &'a mut dyn Task,
}

/// Priority-ordered, fixed collection of tasks.
///
/// The set is assembled once at startup and then handed to
/// [`Scheduler::new`]; ownership transfer is what freezes it, as there is no
/// way to add or remove a task while the scheduler is dispatching. Each
/// scheduler instance owns its own set, so tests can run several schedulers
/// independently.
pub struct TaskSet<'a> {
    slots: heapless::Vec<TaskSlot<'a>, MAX_TASKS>,
}

impl<'a> TaskSet<'a> {
    /// Creates an empty task set.
    pub fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
        }
    }

    /// Registers a task, returning its identifier.
    ///
    /// Identifiers are assigned in registration order and double as the
    /// final dispatch tie-breaker, so registration order is deterministic
    /// and reproducible.
    pub fn add(
        &mut self,
        config: TaskConfig,
        task: &'a mut dyn Task,
    ) -> Result<TaskId, SchedulerError> {
        let id = self.slots.len();
        let slot = TaskSlot {
            config,
            state: TaskState::Dormant,
            deadline_us: 0,
            stats: TaskStats::default(),
            last_fault: None,
            task,
        };
        self.slots
            .push(slot)
            .map_err(|_| SchedulerError::TaskSetFull)?;
        Ok(id)
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no tasks are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<'a> Default for TaskSet<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// One slice of the identified task was executed.
    Ran(TaskId),
    /// No task was ready. `next_deadline_us` is the nearest pending
    /// deadline, if any task can still run; the embedding loop may busy-wait
    /// or sleep until then.
    Idle { next_deadline_us: Option<u64> },
}

/// Cooperative scheduler bound to one task set and one time source.
pub struct Scheduler<'a, T: TimeSource> {
    time: &'a T,
    tasks: TaskSet<'a>,
}

impl<'a, T: TimeSource> Scheduler<'a, T> {
    /// Takes ownership of `tasks` and arms every task's deadline at the
    /// current time, so the whole set becomes ready simultaneously on the
    /// first dispatch pass.
    pub fn new(time: &'a T, mut tasks: TaskSet<'a>) -> Self {
        let now = time.now_us();
        for slot in tasks.slots.iter_mut() {
            slot.deadline_us = now;
            slot.state = TaskState::Ready;
        }
        log_info!("scheduler armed with {} tasks", tasks.len());
        Self { time, tasks }
    }

    /// Executes one dispatch pass: select, run, reschedule.
    ///
    /// Among tasks whose deadline has elapsed the highest priority wins;
    /// ties go to the earliest deadline, then to the lowest task id. The
    /// selected task's deadline advances by its period afterwards, always
    /// from the previous deadline and never from the completion time. A slice
    /// finishing at or after the advanced deadline is recorded as an
    /// overrun and leaves the task immediately ready; missed ticks are never
    /// made up by double-running.
    pub fn run_once(&mut self) -> Dispatch {
        let now = self.time.now_us();

        for slot in self.tasks.slots.iter_mut() {
            if slot.state == TaskState::Dormant && slot.deadline_us <= now {
                slot.state = TaskState::Ready;
            }
        }

        let mut best: Option<TaskId> = None;
        for (id, slot) in self.tasks.slots.iter().enumerate() {
            if slot.state != TaskState::Ready {
                continue;
            }
            match best {
                None => best = Some(id),
                Some(current_id) => {
                    let current = &self.tasks.slots[current_id];
                    let wins = slot.config.priority > current.config.priority
                        || (slot.config.priority == current.config.priority
                            && slot.deadline_us < current.deadline_us);
                    if wins {
                        best = Some(id);
                    }
                }
            }
        }

        let Some(id) = best else {
            return Dispatch::Idle {
                next_deadline_us: self.next_deadline(),
            };
        };

        let slot = &mut self.tasks.slots[id];
        slot.state = TaskState::Running;
        let result = slot.task.step(now);
        let end_us = self.time.now_us();

        slot.stats
            .record_execution(end_us.saturating_sub(now) as u32);

        match result {
            Err(fault) => {
                slot.state = TaskState::Faulted;
                slot.last_fault = Some(fault);
                log_error!("task '{}' faulted: {}", slot.config.name, fault.reason);
            }
            Ok(()) => {
                slot.deadline_us += slot.config.period_us;
                if slot.config.period_us > 0 && end_us >= slot.deadline_us {
                    slot.stats.record_overrun();
                    log_warn!("task '{}' overran its deadline", slot.config.name);
                }
                slot.state = if slot.deadline_us <= end_us {
                    TaskState::Ready
                } else {
                    TaskState::Dormant
                };
            }
        }

        Dispatch::Ran(id)
    }

    /// Nearest pending deadline across all non-faulted tasks.
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks
            .slots
            .iter()
            .filter(|slot| slot.state != TaskState::Faulted)
            .map(|slot| slot.deadline_us)
            .min()
    }

    /// Current lifecycle state of a task.
    pub fn state(&self, id: TaskId) -> Option<TaskState> {
        self.tasks.slots.get(id).map(|slot| slot.state)
    }

    /// Runtime statistics of a task.
    pub fn stats(&self, id: TaskId) -> Option<TaskStats> {
        self.tasks.slots.get(id).map(|slot| slot.stats)
    }

    /// Fault recorded for a task, if it has faulted.
    pub fn fault(&self, id: TaskId) -> Option<TaskFault> {
        self.tasks.slots.get(id).and_then(|slot| slot.last_fault)
    }

    /// Configured name of a task.
    pub fn name(&self, id: TaskId) -> Option<&'static str> {
        self.tasks.slots.get(id).map(|slot| slot.config.name)
    }

    /// Number of tasks in the set (including faulted ones).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the task set is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
