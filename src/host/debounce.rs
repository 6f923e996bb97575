//! Quiet-period debounce for automatic popups.
//!
//! Pure state machine; the host owns the timer and passes the clock in.

use std::time::{Duration, Instant};

use crate::config::Settings;

/// Slack added to every timer so it fires after the quiet period, not on it.
const TIMER_SLACK: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceAction {
    /// Quiet period elapsed: show the definition now.
    Fire,
    /// Events are still arriving; poll again after this long.
    Wait(Duration),
    /// Nothing pending.
    Idle,
}

#[derive(Clone, Debug)]
pub struct Debounce {
    delay: Duration,
    last_event: Option<Instant>,
    pending: bool,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_event: None,
            pending: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Duration::from_millis(settings.auto_delay))
    }

    /// Record a selection change. Returns the timer to schedule, if none is pending.
    pub fn event(&mut self, now: Instant) -> Option<Duration> {
        self.last_event = Some(now);
        if self.pending {
            return None;
        }
        self.pending = true;
        Some(self.delay + TIMER_SLACK)
    }

    /// Timer callback.
    pub fn poll(&mut self, now: Instant) -> DebounceAction {
        let Some(last) = self.last_event.filter(|_| self.pending) else {
            return DebounceAction::Idle;
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed > self.delay {
            self.pending = false;
            DebounceAction::Fire
        } else {
            DebounceAction::Wait(self.delay - elapsed + TIMER_SLACK)
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
