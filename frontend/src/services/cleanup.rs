//! Deferred cleanup tasks with cancel handles.
//!
//! The upload flow schedules the release of each result's object URL.
//! [`BrowserScheduler`] runs tasks on a `setTimeout`. Tests use a
//! `ManualScheduler` that runs them only when its clock is advanced.

use std::cell::Cell;
#[cfg(test)]
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task.
///
/// Cloning shares the handle. Dropping it does not cancel the task.
#[derive(Clone, Debug, Default)]
pub struct CleanupHandle {
    cancelled: Rc<Cell<bool>>,
    fired: Rc<Cell<bool>>,
}

impl CleanupHandle {
    /// Pair a fresh handle with a task that honours it.
    pub fn guard(task: Task) -> (Self, Task) {
        let handle = Self::default();
        let cancelled = Rc::clone(&handle.cancelled);
        let fired = Rc::clone(&handle.fired);
        let guarded: Task = Box::new(move || {
            if cancelled.get() || fired.get() {
                return;
            }
            fired.set(true);
            task();
        });
        (handle, guarded)
    }

    /// Prevent the task from running. No effect once it has run.
    pub fn cancel(&self) {
        if !self.fired.get() {
            self.cancelled.set(true);
        }
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    #[cfg(test)]
    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// Neither run nor cancelled yet.
    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        !self.cancelled.get() && !self.fired.get()
    }
}

/// Runs tasks after a delay.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> CleanupHandle;
}

/// `setTimeout`-backed scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> CleanupHandle {
        let (handle, guarded) = CleanupHandle::guard(task);
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        // The timer must outlive this call; cancellation goes through the handle.
        let _ = Timeout::new(millis, guarded).forget();
        handle
    }
}

/// Scheduler driven by an explicit clock.
#[cfg(test)]
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    queue: RefCell<Vec<(Duration, Task)>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of tasks whose deadline has not been reached.
    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward and run every task now due, earliest first.
    ///
    /// Returns how many tasks were taken off the queue, cancelled ones included.
    pub fn advance(&self, by: Duration) -> usize {
        let now = self.now.get() + by;
        self.now.set(now);

        let mut due = {
            let mut queue = self.queue.borrow_mut();
            let (due, waiting): (Vec<_>, Vec<_>) =
                queue.drain(..).partition(|(deadline, _)| *deadline <= now);
            *queue = waiting;
            due
        };
        due.sort_by_key(|(deadline, _)| *deadline);

        let count = due.len();
        for (_, task) in due {
            task();
        }
        count
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> CleanupHandle {
        let (handle, guarded) = CleanupHandle::guard(task);
        self.queue.borrow_mut().push((self.now.get() + delay, guarded));
        handle
    }
}

#[cfg(test)]
impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Task) -> CleanupHandle {
        (**self).schedule(delay, task)
    }
}
