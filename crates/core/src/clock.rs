// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clock that provides the current time and can suspend the caller
#[async_trait]
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;

    struct FakeClockState {
        current: Instant,
        sleeps: Vec<Duration>,
    }

    /// Fake clock for testing: `sleep` returns immediately after advancing time
    #[derive(Clone)]
    pub struct FakeClock {
        inner: Arc<Mutex<FakeClockState>>,
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeClockState {
                    current: Instant::now(),
                    sleeps: Vec::new(),
                })),
            }
        }

        /// Advance the clock by the given duration
        pub fn advance(&self, duration: Duration) {
            self.inner.lock().current += duration;
        }

        /// Every duration passed to `sleep`, in order
        pub fn sleeps(&self) -> Vec<Duration> {
            self.inner.lock().sleeps.clone()
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.inner.lock().current
        }

        async fn sleep(&self, duration: Duration) {
            self.inner.lock().sleeps.push(duration);
            self.advance(duration);
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
