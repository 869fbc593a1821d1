//! Discrete-event scheduler seam and the default `EventQueue`.
//!
//! The driver never owns a global simulator: it is handed any
//! [`Scheduler`] and drives the run loop itself by pulling events with
//! [`Scheduler::next_event`].
//!
//! # Ordering
//!
//! Events come out in non-decreasing time order; events scheduled for the
//! same instant come out in insertion order.  Once a stop time is set, no
//! event at or after it is ever returned.

use std::collections::{BTreeMap, VecDeque};

use hn_core::{IntervalIndex, SimTime};

/// Events the driver schedules for itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// Start of accounting interval `k`, at time `k * T`.
    IntervalBoundary(IntervalIndex),
}

/// A discrete-event scheduler.
pub trait Scheduler<E> {
    /// Queue `event` at `at`.  Times in the past are clamped to [`now`](Self::now).
    fn schedule_at(&mut self, at: SimTime, event: E);

    /// Refuse every event at or after `at`.
    fn stop(&mut self, at: SimTime);

    fn stop_time(&self) -> Option<SimTime>;

    /// Time of the last event returned by [`next_event`](Self::next_event).
    fn now(&self) -> SimTime;

    /// Remove and return the earliest event, advancing `now` to its time.
    /// `None` once the queue is empty or the next event is at or after the
    /// stop time.
    fn next_event(&mut self) -> Option<(SimTime, E)>;

    /// Drop every pending event.  The scheduler may be reused afterwards.
    fn destroy(&mut self);

    /// Pending events, including any beyond the stop time.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `BTreeMap<SimTime, VecDeque<E>>` event queue.
///
/// O(log W) insert and pop where W is the number of distinct pending times.
pub struct EventQueue<E> {
    inner: BTreeMap<SimTime, VecDeque<E>>,
    total: usize,
    now:   SimTime,
    stop:  Option<SimTime>,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self { inner: BTreeMap::new(), total: 0, now: SimTime::ZERO, stop: None }
    }

    /// Earliest pending time, ignoring the stop time.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> for EventQueue<E> {
    fn schedule_at(&mut self, at: SimTime, event: E) {
        let at = at.max(self.now);
        self.inner.entry(at).or_default().push_back(event);
        self.total += 1;
    }

    fn stop(&mut self, at: SimTime) {
        self.stop = Some(at);
    }

    fn stop_time(&self) -> Option<SimTime> {
        self.stop
    }

    fn now(&self) -> SimTime {
        self.now
    }

    fn next_event(&mut self) -> Option<(SimTime, E)> {
        let mut entry = self.inner.first_entry()?;
        let at = *entry.key();
        if self.stop.is_some_and(|stop| at >= stop) {
            return None;
        }
        let event = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        self.now = at;
        Some((at, event))
    }

    fn destroy(&mut self) {
        self.inner.clear();
        self.total = 0;
    }

    fn len(&self) -> usize {
        self.total
    }
}
