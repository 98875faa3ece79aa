//! Deferred task scheduling with cancellation.
//!
//! The scheduler defers closures to a point in the future and lets the caller
//! cancel them before they run. Controls use it for trailing-edge debouncing:
//! every re-arm cancels the live task and schedules a fresh one, so only the
//! last scheduled task ever executes.
//!
//! Nothing runs on a background thread. The host calls
//! [`SharedTaskScheduler::process_ready`] from its event loop (using
//! [`SharedTaskScheduler::time_until_next`] to decide how long to wait), and
//! ready tasks run on that thread.
//!
//! Time comes from a [`Clock`]. [`SystemClock`] reads `Instant::now()`;
//! [`ManualClock`] only moves when told to, which makes debounce behavior
//! deterministic in tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use typeahead_core::{ManualClock, Scheduler, SharedTaskScheduler};
//!
//! let clock = Arc::new(ManualClock::new());
//! let scheduler = SharedTaskScheduler::with_clock(clock.clone());
//!
//! let first = scheduler.schedule_once(Duration::from_millis(300), Box::new(|| {}));
//! // Re-arm: cancel the pending task and schedule a new one
//! scheduler.cancel(first).unwrap();
//! let _second = scheduler.schedule_once(Duration::from_millis(300), Box::new(|| {}));
//!
//! clock.advance(Duration::from_millis(300));
//! assert_eq!(scheduler.process_ready(), 1);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SchedulerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a scheduled task.
    pub struct ScheduledTaskId;
}

/// A boxed task closure.
pub type BoxedScheduledTask = Box<dyn FnOnce() + Send + 'static>;

// ============================================================================
// Clocks
// ============================================================================

/// A source of the current time for the scheduler.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// A clock backed by the system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only advances when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Create a manual clock frozen at the current system instant.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

// ============================================================================
// Scheduler capability
// ============================================================================

/// The capability controls use to defer work.
///
/// A control receives an `Arc<dyn Scheduler>` at construction instead of
/// reaching for a global timer, which keeps it testable.
pub trait Scheduler: Send + Sync {
    /// Schedule `task` to run once, `delay` from now.
    fn schedule_once(&self, delay: Duration, task: BoxedScheduledTask) -> ScheduledTaskId;

    /// Cancel a pending task.
    ///
    /// Fails with [`SchedulerError::InvalidTaskId`] if the task already ran
    /// or was cancelled.
    fn cancel(&self, id: ScheduledTaskId) -> Result<()>;

    /// Check whether a task is still pending.
    fn is_active(&self, id: ScheduledTaskId) -> bool;
}

// ============================================================================
// Task Scheduler
// ============================================================================

/// Internal scheduled task data.
struct ScheduledTaskData {
    /// When this task should execute.
    run_at: Instant,
    /// The task closure to execute.
    task: BoxedScheduledTask,
}

/// An entry in the scheduler queue (min-heap by execution time).
#[derive(Debug, Clone, Copy)]
struct SchedulerQueueEntry {
    id: ScheduledTaskId,
    run_time: Instant,
    /// Insertion order, so tasks due at the same instant run FIFO.
    sequence: u64,
}

impl PartialEq for SchedulerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time && self.sequence == other.sequence
    }
}

impl Eq for SchedulerQueueEntry {}

impl PartialOrd for SchedulerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchedulerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .run_time
            .cmp(&self.run_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages one-shot deferred tasks.
///
/// Cancelled tasks are removed from the task table immediately; their stale
/// queue entries are skipped lazily when they reach the front of the queue.
pub struct TaskScheduler {
    /// All pending tasks.
    tasks: SlotMap<ScheduledTaskId, ScheduledTaskData>,
    /// Priority queue of pending task executions (min-heap by run time).
    queue: BinaryHeap<SchedulerQueueEntry>,
    /// Monotonic counter for queue entries.
    next_sequence: u64,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl TaskScheduler {
    /// Create a new task scheduler on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new task scheduler on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_sequence: 0,
            clock,
        }
    }

    /// Schedule a one-shot task to execute after the specified delay.
    pub fn schedule_once<F>(&mut self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let run_at = self.clock.now() + delay;
        self.schedule_at(run_at, task)
    }

    /// Schedule a task to execute at a specific instant.
    ///
    /// If the instant is in the past, the task will execute on the next
    /// processing cycle.
    pub fn schedule_at<F>(&mut self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.tasks.insert(ScheduledTaskData {
            run_at: instant,
            task: Box::new(task),
        });

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(SchedulerQueueEntry {
            id,
            run_time: instant,
            sequence,
        });

        tracing::trace!(target: targets::SCHEDULER, ?id, "task scheduled");
        id
    }

    /// Cancel and remove a scheduled task.
    pub fn cancel(&mut self, id: ScheduledTaskId) -> Result<()> {
        if self.tasks.remove(id).is_some() {
            tracing::trace!(target: targets::SCHEDULER, ?id, "task cancelled");
            Ok(())
        } else {
            Err(SchedulerError::InvalidTaskId.into())
        }
    }

    /// Check if a scheduled task is still pending.
    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Get the number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Drop stale entries from the front of the queue.
    fn prune(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.tasks.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }

    /// Get the duration until the next task should execute, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.prune();
        let now = self.clock.now();
        self.queue
            .peek()
            .map(|entry| entry.run_time.saturating_duration_since(now))
    }

    /// Check if there are any tasks ready to execute now.
    pub fn has_ready(&mut self) -> bool {
        self.prune();
        let now = self.clock.now();
        self.queue.peek().is_some_and(|entry| entry.run_time <= now)
    }

    /// Remove and return every task that is due, in execution order.
    pub fn take_ready(&mut self) -> Vec<(ScheduledTaskId, BoxedScheduledTask)> {
        let now = self.clock.now();
        let mut ready = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.run_time > now {
                break;
            }
            let Some(entry) = self.queue.pop() else {
                break;
            };

            // Cancelled tasks have no table entry.
            let Some(data) = self.tasks.remove(entry.id) else {
                continue;
            };
            debug_assert_eq!(data.run_at, entry.run_time);
            ready.push((entry.id, data.task));
        }

        ready
    }

    /// Execute all tasks that are due.
    ///
    /// Returns the number of tasks that were executed.
    pub fn process_ready(&mut self) -> usize {
        let ready = self.take_ready();
        let count = ready.len();
        for (id, task) in ready {
            tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
            task();
        }
        count
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("pending", &self.tasks.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

/// A thread-safe wrapper around `TaskScheduler`.
///
/// Ready tasks are executed after the internal lock has been released, so a
/// task may schedule or cancel other tasks on the same scheduler.
#[derive(Debug)]
pub struct SharedTaskScheduler {
    inner: Mutex<TaskScheduler>,
}

impl SharedTaskScheduler {
    /// Create a shared scheduler on the system clock.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::new()),
        }
    }

    /// Create a shared scheduler on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::with_clock(clock)),
        }
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    pub fn has_ready(&self) -> bool {
        self.inner.lock().has_ready()
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }

    /// Execute all tasks that are due. Returns the number executed.
    #[tracing::instrument(skip(self), target = "typeahead_core::scheduler", level = "trace")]
    pub fn process_ready(&self) -> usize {
        let ready = self.inner.lock().take_ready();
        let count = ready.len();
        for (id, task) in ready {
            tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
            task();
        }
        count
    }
}

impl Default for SharedTaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SharedTaskScheduler {
    fn schedule_once(&self, delay: Duration, task: BoxedScheduledTask) -> ScheduledTaskId {
        self.inner.lock().schedule_once(delay, task)
    }

    fn cancel(&self, id: ScheduledTaskId) -> Result<()> {
        self.inner.lock().cancel(id)
    }

    fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.inner.lock().is_active(id)
    }
}
