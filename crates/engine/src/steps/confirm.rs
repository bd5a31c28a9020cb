// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Block confirmation wait.
//!
//! Finality is approximated from wall-clock time: `elapsed / block_time`
//! blocks count as confirmed. The settlement canister checks real depth
//! on its own, so no block height is queried here.

use crate::step::{Step, StepCore, StepKind};
use async_trait::async_trait;
use onesec_core::{Clock, Confirmations, EvmChain, RunningDetail, StepStatus, Succeeded};
use std::time::{Duration, Instant};

/// Fixed sleep per attempt.
pub const CONFIRM_TICK: Duration = Duration::from_millis(1_000);

pub struct ConfirmBlocksStep<C: Clock> {
    clock: C,
    chain: EvmChain,
    confirmations: Confirmations,
    started: Option<Instant>,
    status: StepStatus,
}

impl<C: Clock> ConfirmBlocksStep<C> {
    pub fn new(clock: C, chain: EvmChain, confirmations: Confirmations) -> Self {
        Self { clock, chain, confirmations, started: None, status: StepStatus::Planned }
    }

    fn confirmed_blocks(&self, elapsed: Duration) -> u64 {
        let block_ms = self.confirmations.block_time.as_millis();
        if block_ms == 0 {
            return self.confirmations.block_count;
        }
        u64::try_from(elapsed.as_millis() / block_ms).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl<C: Clock> Step for ConfirmBlocksStep<C> {
    fn kind(&self) -> StepKind {
        StepKind::ConfirmBlocks
    }

    fn about(&self) -> String {
        format!("Wait for {} blocks", self.confirmations.block_count)
    }

    fn details(&self) -> String {
        format!(
            "Wait for {} blocks on {} until the transaction is final, about {}s",
            self.confirmations.block_count,
            self.chain,
            self.expected_duration().as_secs()
        )
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        let count = u32::try_from(self.confirmations.block_count).unwrap_or(u32::MAX);
        self.confirmations.block_time.saturating_mul(count)
    }
}

#[async_trait]
impl<C: Clock> StepCore for ConfirmBlocksStep<C> {
    async fn attempt(&mut self) -> StepStatus {
        let started = *self.started.get_or_insert_with(|| self.clock.now());
        self.clock.sleep(CONFIRM_TICK).await;

        let elapsed = self.clock.now().saturating_duration_since(started);
        let required = self.confirmations.block_count;
        let confirmed = self.confirmed_blocks(elapsed);
        if confirmed >= required {
            Succeeded::new(format!("Confirmed {required} blocks on {}", self.chain)).into()
        } else {
            StepStatus::running_with(
                format!("Confirmed {confirmed} of {required} blocks on {}", self.chain),
                RunningDetail::Blocks { confirmed, required },
            )
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

#[cfg(test)]
#[path = "confirm_tests.rs"]
mod tests;
