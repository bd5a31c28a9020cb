// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered list of steps driven to completion.

use crate::step::Step;
use onesec_core::{ExpectedFee, StepStatus};
use std::time::Duration;

/// A fixed sequence of steps and a cursor.
///
/// The cursor only moves past `Succeeded` steps, so every step before it
/// has succeeded. A `Failed` or `Refunded` step under the cursor halts the
/// plan: [`next_step_to_run`](Self::next_step_to_run) returns `None` until
/// the caller retries that step explicitly.
///
/// The plan owns its steps; durability comes from the transfer id and the
/// resume builder, not from the plan itself.
pub struct BridgingPlan {
    steps: Vec<Box<dyn Step>>,
    cursor: usize,
}

impl BridgingPlan {
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self { steps, cursor: 0 }
    }

    pub fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    /// A single step, for a caller that re-runs it out of order.
    pub fn step_mut(&mut self, index: usize) -> Option<&mut dyn Step> {
        self.steps.get_mut(index).map(|step| step.as_mut() as &mut dyn Step)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Advances the cursor past succeeded steps and returns its position,
    /// or `None` when the plan is done or halted.
    pub fn next_step_index(&mut self) -> Option<usize> {
        while self.steps.get(self.cursor).is_some_and(|step| step.status().is_succeeded()) {
            self.cursor += 1;
        }
        let step = self.steps.get(self.cursor)?;
        if step.status().is_halting() {
            return None;
        }
        Some(self.cursor)
    }

    pub fn next_step_to_run(&mut self) -> Option<&mut dyn Step> {
        let index = self.next_step_index()?;
        Some(self.steps[index].as_mut())
    }

    /// The step the plan halted on, otherwise the last step the cursor
    /// moved past.
    pub fn latest_step(&self) -> Option<&dyn Step> {
        match self.steps.get(self.cursor) {
            Some(step) if step.status().is_halting() => Some(step.as_ref()),
            _ => self.cursor.checked_sub(1).and_then(|i| self.steps.get(i)).map(|s| s.as_ref()),
        }
    }

    /// Runs steps until none is runnable; returns the latest step's status.
    ///
    /// Polling steps keep the loop going until the remote side settles.
    pub async fn run_all_steps(&mut self) -> StepStatus {
        while let Some(index) = self.next_step_index() {
            let step = &mut self.steps[index];
            let status = step.run().await;
            tracing::info!(
                index,
                step = %step.kind(),
                status = %status.kind(),
                "plan step ran"
            );
        }
        self.latest_step().map(|step| step.status().clone()).unwrap_or_default()
    }

    /// Re-runs the `Failed` step the plan halted on.
    ///
    /// Returns `None` when the plan is not halted on a failure; `Refunded`
    /// is final and never retried.
    pub async fn retry(&mut self) -> Option<StepStatus> {
        let step = self.steps.get_mut(self.cursor)?;
        if !matches!(step.status(), StepStatus::Failed(_)) {
            return None;
        }
        tracing::info!(index = self.cursor, step = %step.kind(), "retrying halted step");
        Some(step.run().await)
    }

    /// Sum of the steps' estimates. Advisory only.
    pub fn expected_duration(&self) -> Duration {
        self.steps.iter().map(|step| step.expected_duration()).sum()
    }

    /// Fee fixed by the fee step, once it succeeded.
    pub fn expected_fee(&self) -> Option<ExpectedFee> {
        self.steps.iter().find_map(|step| match step.status() {
            StepStatus::Succeeded(outcome) => outcome.expected_fee,
            _ => None,
        })
    }

    /// Forwarding address computed by the forwarding flow, once known.
    pub fn forwarding_address(&self) -> Option<String> {
        self.steps.iter().find_map(|step| match step.status() {
            StepStatus::Succeeded(outcome) => outcome.forwarding_address.clone(),
            _ => None,
        })
    }
}

impl std::fmt::Debug for BridgingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgingPlan")
            .field("steps", &self.steps.iter().map(|s| s.kind()).collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
