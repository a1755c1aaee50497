//! Single-owner one-shot timers driven by explicit instants.
//!
//! Timers never run code on their own: the event loop asks for the earliest
//! deadline, sleeps at most that long, and then polls. Tests drive them with a
//! virtual clock.

use std::time::{Duration, Instant};

/// A timer that fires at most once, carrying a payload.
///
/// Scheduling replaces any pending deadline, so at most one firing is ever
/// outstanding.
#[derive(Debug, Clone)]
pub struct OneShot<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> OneShot<T> {
    /// Unscheduled timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay` after `now`, cancelling any pending firing.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) {
        self.pending = Some((now + delay, payload));
    }

    /// Cancel the pending firing, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Scheduled and not yet fired or cancelled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the timer fires, if scheduled.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Fire if the deadline has been reached. Returns the payload exactly once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((at, _)) if *at <= now);
        if due {
            self.pending.take().map(|(_, payload)| payload)
        } else {
            None
        }
    }
}

/// Earliest of several optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
