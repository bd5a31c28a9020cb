// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed hand-off between steps.
//!
//! A producing step publishes into a slot when it succeeds; consuming steps
//! hold a clone of the same slot and read it when they run.

use parking_lot::Mutex;
use std::sync::Arc;

pub struct Slot<T> {
    value: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self { value: Arc::clone(&self.value) }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { value: Arc::new(Mutex::new(None)) }
    }
}

impl<T: Clone> Slot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `value`, for resumed plans.
    pub fn filled(value: T) -> Self {
        Self { value: Arc::new(Mutex::new(Some(value))) }
    }

    pub fn publish(&self, value: T) {
        *self.value.lock() = Some(value);
    }

    pub fn get(&self) -> Option<T> {
        self.value.lock().clone()
    }

    pub fn is_filled(&self) -> bool {
        self.value.lock().is_some()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Slot").field(&*self.value.lock()).finish()
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
