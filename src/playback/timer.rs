//! Timer queue: one-shot timers on a single-threaded timeline.
//!
//! Time is a [`Duration`] measured from the queue's origin. Nothing here
//! reads the wall clock; the owner decides how time moves, either by jumping
//! (`advance_to` in tests) or by sleeping until [`TimerQueue::next_deadline`]
//! and then advancing to the real elapsed time.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

/// Identity of one scheduled timer.
///
/// Handles are never reused within a queue, so a handle that has fired or
/// been cancelled can never be mistaken for a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A queue of pending one-shot timers ordered by deadline.
///
/// Timers sharing a deadline fire in the order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    /// Current position on the timeline.
    now: Duration,
    /// Next handle id to hand out.
    next_id: u64,
    /// Pending timers, ordered by (deadline, handle).
    order: BTreeSet<(Duration, TimerHandle)>,
    /// Deadline lookup for cancellation.
    deadlines: HashMap<TimerHandle, Duration>,
}

impl TimerQueue {
    /// Create an empty queue positioned at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position on the timeline.
    #[inline]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a timer `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let deadline = self.now.saturating_add(delay);
        self.order.insert((deadline, handle));
        self.deadlines.insert(handle, deadline);
        handle
    }

    /// Cancel a pending timer.
    ///
    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle) {
            Some(deadline) => self.order.remove(&(deadline, handle)),
            None => false,
        }
    }

    /// Whether `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.order.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.order.first().map(|&(deadline, _)| deadline)
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline (never backwards), so a
    /// timer scheduled from inside the firing callback is measured from the
    /// moment its predecessor was due, not from when the caller woke up.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        let &(deadline, handle) = self.order.first()?;
        if deadline > until {
            return None;
        }
        self.order.pop_first();
        self.deadlines.remove(&handle);
        self.now = self.now.max(deadline);
        Some(handle)
    }

    /// Fire every timer due up to `until`, then move the clock there.
    ///
    /// `dispatch` receives each fired handle together with the queue, so it
    /// may schedule follow-up timers; those fire in this same call if they
    /// fall due before `until`. Returns the number of timers fired.
    pub fn advance_to<F>(&mut self, until: Duration, mut dispatch: F) -> usize
    where
        F: FnMut(&mut Self, TimerHandle),
    {
        let mut fired = 0;
        while let Some(handle) = self.pop_due(until) {
            dispatch(self, handle);
            fired += 1;
        }
        self.now = self.now.max(until);
        fired
    }

    /// Like [`advance_to`](Self::advance_to), relative to the current time.
    pub fn advance_by<F>(&mut self, delta: Duration, dispatch: F) -> usize
    where
        F: FnMut(&mut Self, TimerHandle),
    {
        let until = self.now.saturating_add(delta);
        self.advance_to(until, dispatch)
    }
}
