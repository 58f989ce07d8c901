//! Timer state structure and transition rules

use serde::{Deserialize, Serialize};

/// Limit the timer starts with and returns to on reset
pub const DEFAULT_LIMIT_MINUTES: u32 = 25;

/// Derived phase of the timer, used for display and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Timer state owned by a single timer instance.
///
/// Every transition takes the current state by value and returns the next
/// one. Preconditions are checked here, so calling a transition that the
/// interface would have disabled is always a harmless no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub is_running: bool,
    pub elapsed_seconds: u64,
    pub limit_minutes: u32,
}

impl TimerState {
    /// Create the initial snapshot: stopped, nothing elapsed, 25 minute limit
    pub fn new() -> Self {
        Self {
            is_running: false,
            elapsed_seconds: 0,
            limit_minutes: DEFAULT_LIMIT_MINUTES,
        }
    }

    /// Limit expressed in seconds
    pub fn limit_seconds(&self) -> u64 {
        u64::from(self.limit_minutes) * 60
    }

    /// Seconds left before the limit is reached
    pub fn remaining_seconds(&self) -> u64 {
        self.limit_seconds().saturating_sub(self.elapsed_seconds)
    }

    /// Check if elapsed time has reached the limit
    pub fn is_completed(&self) -> bool {
        self.elapsed_seconds == self.limit_seconds()
    }

    /// Limit controls only operate before the first tick of a run
    pub fn limit_controls_enabled(&self) -> bool {
        self.elapsed_seconds == 0
    }

    /// Derive the current phase from the raw fields
    pub fn phase(&self) -> TimerPhase {
        if self.is_running {
            TimerPhase::Running
        } else if self.is_completed() {
            TimerPhase::Completed
        } else if self.elapsed_seconds == 0 {
            TimerPhase::Idle
        } else {
            TimerPhase::Paused
        }
    }

    /// Add one minute to the limit, only before the first tick of a run
    pub fn increase_limit(self) -> Self {
        if !self.limit_controls_enabled() {
            return self;
        }
        match self.limit_minutes.checked_add(1) {
            Some(limit_minutes) => Self { limit_minutes, ..self },
            None => self,
        }
    }

    /// Remove one minute from the limit, only before the first tick and never below one
    pub fn decrease_limit(self) -> Self {
        if !self.limit_controls_enabled() || self.limit_minutes <= 1 {
            return self;
        }
        Self {
            limit_minutes: self.limit_minutes - 1,
            ..self
        }
    }

    /// Toggle running. A completed timer is rewound to zero first.
    pub fn start_or_pause(self) -> Self {
        let elapsed_seconds = if self.is_completed() {
            0
        } else {
            self.elapsed_seconds
        };
        Self {
            is_running: !self.is_running,
            elapsed_seconds,
            ..self
        }
    }

    /// Advance by one second, or stop if the limit was already reached
    pub fn tick(self) -> Self {
        if !self.is_running {
            return self;
        }
        if self.is_completed() {
            Self {
                is_running: false,
                ..self
            }
        } else {
            Self {
                elapsed_seconds: self.elapsed_seconds + 1,
                ..self
            }
        }
    }

    /// Return to the initial snapshot, limit included
    pub fn reset(self) -> Self {
        Self::new()
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
