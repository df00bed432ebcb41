//! Host task queue for one-shot deferred callbacks.
//!
//! Widgets never block. When they need to resume work later they post a
//! [`DeferredTask`] to a [`Scheduler`]; the host drains due tasks on its UI
//! thread and hands each one back to the widget that posted it.

use crate::clock::Clock;
use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::Duration;

/// Token for a deferred callback.
///
/// `generation` identifies the run that posted it; a receiver whose run has
/// since been stopped or restarted drops the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeferredTask {
    /// Run generation at the time the task was posted
    pub generation: u64,
}

/// Accepts one-shot callbacks to run after a delay.
pub trait Scheduler {
    /// Queue `task` to fire once `delay` has elapsed.
    fn post_delayed(&mut self, delay: Duration, task: DeferredTask);
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: Duration,
    seq: u64,
    task: DeferredTask,
}

#[derive(Debug, Default)]
struct QueueState {
    entries: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

/// Clock-driven [`Scheduler`] shared between a widget and its host.
///
/// Clones refer to the same queue.
#[derive(Debug)]
pub struct TimerQueue<C: Clock> {
    clock: C,
    state: Rc<RefCell<QueueState>>,
}

impl<C: Clock + Clone> Clone for TimerQueue<C> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            state: Rc::clone(&self.state),
        }
    }
}

impl<C: Clock> TimerQueue<C> {
    /// Create an empty queue reading time from `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: Rc::default(),
        }
    }

    /// Remove and return every task whose delay has elapsed, earliest first.
    /// Tasks due at the same instant come out in posting order.
    pub fn drain_due(&self) -> Vec<DeferredTask> {
        let now = self.clock.now();
        let mut state = self.state.borrow_mut();
        let mut due = Vec::new();
        while state
            .entries
            .peek()
            .is_some_and(|Reverse(entry)| entry.due <= now)
        {
            if let Some(Reverse(entry)) = state.entries.pop() {
                due.push(entry.task);
            }
        }
        due
    }

    /// Time at which the earliest pending task fires.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.state
            .borrow()
            .entries
            .peek()
            .map(|Reverse(entry)| entry.due)
    }

    /// Number of tasks not yet drained.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Drop every pending task.
    pub fn clear(&self) {
        self.state.borrow_mut().entries.clear();
    }
}

impl<C: Clock> Scheduler for TimerQueue<C> {
    fn post_delayed(&mut self, delay: Duration, task: DeferredTask) {
        let due = self.clock.now() + delay;
        let mut state = self.state.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        tracing::trace!(generation = task.generation, ?due, "deferred task posted");
        state.entries.push(Reverse(Entry { due, seq, task }));
    }
}
