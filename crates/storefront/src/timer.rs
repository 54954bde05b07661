//! Single-slot deadline timers.
//!
//! A [`TimerSlot`] holds at most one pending deadline. Arming it again
//! replaces the previous deadline and payload, so a burst of notifications
//! or repeated checkouts leaves exactly one timer pending. Time is supplied
//! by the caller, which keeps firing deterministic under test.

use std::time::{Duration, Instant};

/// Identifies one arming of a slot. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Pending<T> {
    token: TimerToken,
    deadline: Instant,
    payload: T,
}

/// A timer with room for one pending deadline.
#[derive(Debug)]
pub struct TimerSlot<T> {
    pending: Option<Pending<T>>,
    generation: u64,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }
}

impl<T> TimerSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay` after `now`, discarding any
    /// previously pending payload.
    pub fn arm(&mut self, now: Instant, delay: Duration, payload: T) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        if let Some(previous) = self.pending.take() {
            tracing::debug!(
                replaced = previous.token.generation(),
                generation = token.generation(),
                "Timer re-armed"
            );
        }
        self.pending = Some(Pending {
            token,
            deadline: now + delay,
            payload,
        });
        token
    }

    /// Take the payload if its deadline is at or before `now`.
    pub fn fire_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {
                self.pending.take().map(|pending| pending.payload)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
