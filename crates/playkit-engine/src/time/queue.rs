use std::cell::RefCell;
use std::rc::Rc;

use super::Clock;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task.
///
/// Passing it to [`Timer::cancel`] prevents the task from running. Handles
/// are unique per queue and never reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimerHandle(u64);

/// One-shot timer facility.
///
/// `delay_ms` is honored as a lower bound only, never an exact deadline. A
/// non-positive delay means "as soon as the host gets around to it", not
/// "right now": the task still goes through the queue.
pub trait Timer {
    fn schedule(&self, delay_ms: f64, task: Task) -> TimerHandle;

    /// Cancels a scheduled task. No-op if the task already ran or the handle
    /// is unknown.
    fn cancel(&self, handle: TimerHandle);
}

struct Entry {
    id: u64,
    due_ms: f64,
    task: Task,
}

#[derive(Default)]
struct QueueInner {
    next_id: u64,
    entries: Vec<Entry>,
}

impl QueueInner {
    /// Removes and returns the next task with `due_ms <= now_ms` and
    /// `id < id_horizon`, earliest deadline first, insertion order breaking
    /// ties.
    fn take_next_due(&mut self, now_ms: f64, id_horizon: u64) -> Option<Task> {
        let mut best: Option<usize> = None;
        for (i, e) in self.entries.iter().enumerate() {
            if e.id >= id_horizon || e.due_ms > now_ms {
                continue;
            }
            best = match best {
                None => Some(i),
                Some(b) => {
                    let cur = &self.entries[b];
                    if (e.due_ms, e.id) < (cur.due_ms, cur.id) {
                        Some(i)
                    } else {
                        Some(b)
                    }
                }
            };
        }
        best.map(|i| self.entries.remove(i).task)
    }
}

/// Single-threaded one-shot task queue.
///
/// The host drives it by calling [`run_due`] whenever it wants deferred work
/// to happen; between pumps nothing runs and nothing blocks. Cloning yields
/// another handle to the same queue.
///
/// A task may schedule or cancel freely while it runs, but tasks scheduled
/// during a drain never run in that same drain — a self-requeueing task is a
/// true asynchronous resubmission, not recursion.
#[derive(Clone)]
pub struct TaskQueue {
    clock: Rc<dyn Clock>,
    inner: Rc<RefCell<QueueInner>>,
}

impl TaskQueue {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Rc::new(RefCell::new(QueueInner::default())),
        }
    }

    /// Number of tasks currently scheduled.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Earliest scheduled deadline, if any. May be in the past.
    pub fn next_due_ms(&self) -> Option<f64> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|e| e.due_ms)
            .fold(None, |acc, due| match acc {
                None => Some(due),
                Some(best) => Some(if due < best { due } else { best }),
            })
    }

    /// Runs every task whose deadline has passed. Returns how many ran.
    ///
    /// The clock is read once at entry; tasks scheduled by the tasks being
    /// drained are left for the next pump even if already due.
    pub fn run_due(&self) -> usize {
        let now_ms = self.clock.now_ms();
        let id_horizon = self.inner.borrow().next_id;
        let mut fired = 0;
        loop {
            let task = {
                let mut q = self.inner.borrow_mut();
                match q.take_next_due(now_ms, id_horizon) {
                    Some(task) => task,
                    None => break,
                }
            };
            // Borrow released: the task may schedule or cancel re-entrantly.
            task();
            fired += 1;
        }
        fired
    }
}

impl Timer for TaskQueue {
    fn schedule(&self, delay_ms: f64, task: Task) -> TimerHandle {
        let due_ms = self.clock.now_ms() + delay_ms;
        let mut q = self.inner.borrow_mut();
        let id = q.next_id;
        q.next_id += 1;
        q.entries.push(Entry { id, due_ms, task });
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut q = self.inner.borrow_mut();
        if let Some(i) = q.entries.iter().position(|e| e.id == handle.0) {
            q.entries.remove(i);
        }
    }
}
