// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exponential backoff for polling steps. No jitter, no attempt limit.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1_000);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);
/// Delays below this are bumped up before growing.
pub const MIN_DELAY: Duration = Duration::from_millis(10);

/// `min(max, max(current, MIN_DELAY) * 1.2)`, in whole milliseconds.
pub fn next_delay(current: Duration, max: Duration) -> Duration {
    let base = current.max(MIN_DELAY).as_millis();
    let grown = base.saturating_mul(6) / 5;
    let grown = Duration::from_millis(u64::try_from(grown).unwrap_or(u64::MAX));
    grown.min(max)
}

/// Per-step poll delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backoff {
    current: Duration,
    max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DELAY)
    }
}

impl Backoff {
    pub fn new(initial: Duration) -> Self {
        Self { current: initial, max: DEFAULT_MAX_DELAY }
    }

    pub fn with_max(mut self, max: Duration) -> Self {
        self.max = max;
        self
    }

    pub fn current(&self) -> Duration {
        self.current
    }

    /// Returns the delay to sleep now and grows the next one.
    pub fn next(&mut self) -> Duration {
        let delay = self.current;
        self.current = next_delay(self.current, self.max);
        delay
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
