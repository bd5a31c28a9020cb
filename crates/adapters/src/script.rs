// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted replies for fake adapters.

use std::collections::VecDeque;

/// Queue of canned replies. The last reply sticks once the rest are used up.
pub(crate) struct Script<T> {
    replies: VecDeque<T>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self { replies: VecDeque::new() }
    }
}

impl<T: Clone> Script<T> {
    pub(crate) fn push(&mut self, reply: T) {
        self.replies.push_back(reply);
    }

    pub(crate) fn next(&mut self) -> Option<T> {
        if self.replies.len() > 1 {
            self.replies.pop_front()
        } else {
            self.replies.front().cloned()
        }
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
