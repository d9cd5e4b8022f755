//! Countdown timer for cooldowns and input-suppression windows
//!
//! Timers measure wall time from activation. `update()` must be polled at
//! least once per duration window; a repeating timer then fires once per
//! window, re-stamping its start from the poll that observed the expiry.
//! Rather than invoking a stored callback, `update()` returns whether the
//! timer fired on this poll so the caller decides what happens.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Timer {
    duration: Duration,
    start: Option<Instant>,
    repeat: bool,
}

impl Timer {
    /// One-shot timer; stays inactive until `activate()`
    pub fn new(duration: Duration) -> Self {
        Timer {
            duration,
            start: None,
            repeat: false,
        }
    }

    /// Repeating timer: re-activates itself each time it fires
    pub fn repeating(duration: Duration) -> Self {
        Timer {
            duration,
            start: None,
            repeat: true,
        }
    }

    pub fn active(&self) -> bool {
        self.start.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start (or restart) the countdown from now
    pub fn activate(&mut self) {
        self.activate_at(Instant::now());
    }

    /// Start the countdown from an explicit instant
    pub fn activate_at(&mut self, now: Instant) {
        self.start = Some(now);
    }

    /// Stop the countdown without firing. Idempotent, also for repeating
    /// timers: a deactivated timer stays inactive until the next `activate()`.
    pub fn deactivate(&mut self) {
        self.start = None;
    }

    /// Poll the timer; returns true when the countdown expired on this poll.
    /// A repeating timer immediately restarts; a one-shot timer deactivates.
    pub fn update(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Poll against an explicit instant (the seam `update()` goes through)
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(start) = self.start else {
            return false;
        };

        if now.duration_since(start) < self.duration {
            return false;
        }

        self.start = if self.repeat { Some(now) } else { None };
        true
    }
}
