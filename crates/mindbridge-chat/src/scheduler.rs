//! Delayed execution of assistant turns.
//!
//! The session never sleeps itself. It hands each reply to a
//! [`ReplyScheduler`]: [`TokioScheduler`] runs it after a real delay,
//! [`ManualScheduler`] keeps a virtual clock that tests advance by hand.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;

/// A unit of deferred work.
pub type ReplyTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once `delay` has elapsed.
pub trait ReplyScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: ReplyTask);
}

// =============================================================================
// TokioScheduler
// =============================================================================

/// Scheduler backed by `tokio::time::sleep` on a runtime handle.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime of the calling context, if there is one.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl ReplyScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ReplyTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

// =============================================================================
// ManualScheduler
// =============================================================================

struct PendingTask {
    due: Duration,
    seq: u64,
    task: ReplyTask,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    queue: Vec<PendingTask>,
}

impl ManualState {
    /// Remove the earliest task due at or before `deadline`.
    /// Ties run in scheduling order.
    fn pop_due(&mut self, deadline: Option<Duration>) -> Option<PendingTask> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, p)| deadline.map_or(true, |d| p.due <= d))
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(self.queue.swap_remove(idx))
    }
}

/// Deterministic scheduler with a virtual clock.
///
/// Nothing runs until [`advance`](Self::advance) or
/// [`run_until_idle`](Self::run_until_idle) is called. Tasks run on the
/// caller's thread with no internal lock held, so they may schedule more work.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.now() + by;
        let mut ran = 0;
        while let Some(pending) = self.take_next(Some(deadline)) {
            (pending.task)();
            ran += 1;
        }
        self.lock().now = deadline;
        ran
    }

    /// Run tasks in due order until none remain, including any scheduled
    /// while running. Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(pending) = self.take_next(None) {
            (pending.task)();
            ran += 1;
        }
        ran
    }

    fn take_next(&self, deadline: Option<Duration>) -> Option<PendingTask> {
        let mut state = self.lock();
        let pending = state.pop_due(deadline)?;
        state.now = state.now.max(pending.due);
        Some(pending)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReplyScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ReplyTask) {
        let mut state = self.lock();
        let due = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queue.push(PendingTask { due, seq, task });
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> ReplyTask) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log2 = Arc::clone(&log);
        let make = move |name: &'static str| -> ReplyTask {
            let log = Arc::clone(&log2);
            Box::new(move || log.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_manual_nothing_runs_without_advance() {
        let s = ManualScheduler::new();
        let (log, task) = recorder();
        s.schedule(Duration::from_millis(10), task("a"));
        assert_eq!(s.pending(), 1);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_manual_advance_runs_only_due_tasks() {
        let s = ManualScheduler::new();
        let (log, task) = recorder();
        s.schedule(Duration::from_millis(1500), task("late"));
        s.schedule(Duration::from_millis(1000), task("early"));

        assert_eq!(s.advance(Duration::from_millis(999)), 0);
        assert_eq!(s.advance(Duration::from_millis(1)), 1);
        assert_eq!(*log.lock().unwrap(), vec!["early"]);
        assert_eq!(s.now(), Duration::from_millis(1000));

        assert_eq!(s.advance(Duration::from_millis(500)), 1);
        assert_eq!(*log.lock().unwrap(), vec!["early", "late"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_manual_ties_run_in_schedule_order() {
        let s = ManualScheduler::new();
        let (log, task) = recorder();
        for name in ["one", "two", "three"] {
            s.schedule(Duration::from_millis(5), task(name));
        }
        s.run_until_idle();
        assert_eq!(*log.lock().unwrap(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_manual_tasks_may_schedule_more() {
        let s = Arc::new(ManualScheduler::new());
        let count = Arc::new(AtomicUsize::new(0));

        let s2 = Arc::clone(&s);
        let c2 = Arc::clone(&count);
        s.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                c2.fetch_add(1, Ordering::SeqCst);
                let c3 = Arc::clone(&c2);
                s2.schedule(
                    Duration::from_millis(10),
                    Box::new(move || {
                        c3.fetch_add(1, Ordering::SeqCst);
                    }),
                );
            }),
        );

        assert_eq!(s.advance(Duration::from_millis(15)), 1);
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance(Duration::from_millis(5)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(s.now(), Duration::from_millis(20));
    }

    #[test]
    fn test_manual_run_until_idle_moves_clock() {
        let s = ManualScheduler::new();
        let (_log, task) = recorder();
        s.schedule(Duration::from_secs(3), task("x"));
        assert_eq!(s.run_until_idle(), 1);
        assert_eq!(s.now(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_tokio_scheduler_runs_after_delay() {
        let scheduler = TokioScheduler::current().expect("inside a runtime");
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        scheduler.schedule(
            Duration::from_millis(20),
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(count.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tokio_scheduler_current_outside_runtime() {
        assert!(TokioScheduler::current().is_none());
    }
}
