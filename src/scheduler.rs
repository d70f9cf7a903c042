//! Cancellable delayed actions, polled once per simulation step.
//!
//! The scheduler keeps its own monotonic clock which only moves when
//! [`TimedEventScheduler::advance`] is called. Due actions are handed out one at a
//! time by [`TimedEventScheduler::pop_due`], so an action that cancels others while
//! it runs prevents them from firing later in the same step.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use tracing::trace;

/// Identifies a single scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// An action waiting for its fire time.
#[derive(Debug)]
struct PendingTimer<A> {
    fire_at: Duration,
    seq: u64,
    action: A,
}

impl<A> PartialEq for PendingTimer<A> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<A> Eq for PendingTimer<A> {}

impl<A> PartialOrd for PendingTimer<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for PendingTimer<A> {
    // Reversed so the max-heap yields the earliest (then oldest) timer first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.fire_at.cmp(&self.fire_at).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-heap of `(fire_at, seq, action)` entries on a simulation clock.
#[derive(Debug)]
pub struct TimedEventScheduler<A> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<PendingTimer<A>>,
}

impl<A> Default for TimedEventScheduler<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }
}

impl<A> TimedEventScheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scheduler's current clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `action` to fire once `delay` has elapsed.
    pub fn schedule(&mut self, action: A, delay: Duration) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;

        let fire_at = self.now.saturating_add(delay);
        trace!(seq, ?delay, ?fire_at, "Timer scheduled");
        self.pending.push(PendingTimer { fire_at, seq, action });

        TimerHandle(seq)
    }

    /// Cancels a single pending action. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.seq != handle.0);
        before != self.pending.len()
    }

    /// Cancels every pending action, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        if cancelled > 0 {
            trace!(cancelled, "Cancelled all pending timers");
        }
        cancelled
    }

    /// Cancels every pending action matching `predicate`, returning how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&A) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| !predicate(&timer.action));
        before - self.pending.len()
    }

    /// Moves the clock forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Removes and returns the earliest action whose fire time has been reached.
    pub fn pop_due(&mut self) -> Option<A> {
        if self.pending.peek()?.fire_at > self.now {
            return None;
        }
        self.pending.pop().map(|timer| timer.action)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending actions with the time left until each fires, in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = (&A, Duration)> {
        self.pending
            .iter()
            .map(|timer| (&timer.action, timer.fire_at.saturating_sub(self.now)))
    }
}
