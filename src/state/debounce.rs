//! Trailing debounce over a changing value.

use super::timer::OneShot;
use std::time::{Duration, Instant};

/// Default settle delay for the search query.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A value that only advances after its input has been stable for `delay`.
///
/// Every change of the observed input cancels the pending timer and starts a
/// new one, so a burst of changes settles once, on the last value. Observing
/// the same input again does not restart the timer.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    value: T,
    latest: T,
    delay: Duration,
    timer: OneShot<T>,
}

impl<T: Clone + PartialEq> Debounced<T> {
    /// Settled on `initial`, nothing pending.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            value: initial.clone(),
            latest: initial,
            delay,
            timer: OneShot::new(),
        }
    }

    /// Feed the current input.
    pub fn observe(&mut self, input: T, now: Instant) {
        if input == self.latest {
            return;
        }
        self.latest = input.clone();
        self.timer.schedule(now, self.delay, input);
    }

    /// Advance the settled value if the input has been stable long enough.
    ///
    /// Returns the new value only when it differs from the previous settled
    /// value; a burst that ends where it started emits nothing.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let settled = self.timer.poll(now)?;
        if settled == self.value {
            return None;
        }
        self.value = settled.clone();
        Some(settled)
    }

    /// Last settled value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// When the pending input will settle.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// An observed value is waiting out the delay.
    pub fn is_settling(&self) -> bool {
        self.timer.is_pending()
    }

    /// Drop the pending input without emitting it.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.latest = self.value.clone();
    }
}
