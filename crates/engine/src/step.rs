// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The step state machine shared by every concrete step.

use async_trait::async_trait;
use onesec_core::{Backoff, Clock, StepStatus};
use std::time::Duration;

/// Rough duration of one canister call, for ETA estimates.
pub const ICP_CALL_DURATION: Duration = Duration::from_millis(5_000);
/// Rough duration of one signed EVM transaction, for ETA estimates.
pub const EVM_CALL_DURATION: Duration = Duration::from_millis(5_000);

/// What a step does, independent of its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    FetchFees,
    Approve,
    Lock,
    Burn,
    ConfirmBlocks,
    ValidateReceipt,
    WaitForIcpTx,
    ComputeForwardingAddress,
    NotifyForwardingPayment,
    WaitForForwardingTx,
    ValidateForwardingReceipt,
    IcpApprove,
    IcpTransfer,
    WaitForEvmTx,
    ValidateEvmReceipt,
}

onesec_core::simple_display! {
    StepKind {
        FetchFees => "fetch-fees",
        Approve => "approve",
        Lock => "lock",
        Burn => "burn",
        ConfirmBlocks => "confirm-blocks",
        ValidateReceipt => "validate-receipt",
        WaitForIcpTx => "wait-for-icp-tx",
        ComputeForwardingAddress => "compute-forwarding-address",
        NotifyForwardingPayment => "notify-forwarding-payment",
        WaitForForwardingTx => "wait-for-forwarding-tx",
        ValidateForwardingReceipt => "validate-forwarding-receipt",
        IcpApprove => "icp-approve",
        IcpTransfer => "icp-transfer",
        WaitForEvmTx => "wait-for-evm-tx",
        ValidateEvmReceipt => "validate-evm-receipt",
    }
}

pub(crate) mod sealed {
    use async_trait::async_trait;
    use onesec_core::StepStatus;

    /// The mutating half of a step, reachable only through
    /// [`Step::run`](super::Step::run).
    #[async_trait]
    pub trait StepCore: Send + Sync {
        /// One attempt. Only called when the step is not already done.
        async fn attempt(&mut self) -> StepStatus;

        fn record(&mut self, status: StepStatus);
    }
}

pub(crate) use sealed::StepCore;

/// One unit of a bridging plan.
///
/// `Planned -> Running -> {Succeeded | Failed | Refunded}`. `Running`
/// repeats until the remote side settles. `Succeeded` and `Refunded` are
/// final: [`run`](Step::run) returns the stored status without acting.
/// `Failed` is final for the plan, but running the step again retries it
/// from scratch.
///
/// Only [`run`](Step::run) changes the status; the trait cannot be
/// implemented outside this crate.
#[async_trait]
pub trait Step: StepCore {
    fn kind(&self) -> StepKind;

    /// Short label for progress lists.
    fn about(&self) -> String;

    /// Long-form description of what the step does.
    fn details(&self) -> String;

    fn status(&self) -> &StepStatus;

    /// Static ETA contribution; not a timeout.
    fn expected_duration(&self) -> Duration;

    async fn run(&mut self) -> StepStatus {
        if matches!(self.status(), StepStatus::Succeeded(_) | StepStatus::Refunded(_)) {
            return self.status().clone();
        }
        if let StepStatus::Failed(failed) = self.status() {
            tracing::info!(step = %self.kind(), error = %failed.error, "retrying failed step");
        }
        let status = self.attempt().await;
        tracing::info!(
            step = %self.kind(),
            status = %status.kind(),
            detail = %status.description(),
            "step attempt finished"
        );
        self.record(status.clone());
        status
    }
}

/// Sleep-then-read pacing for polling steps.
#[derive(Clone)]
pub struct Poller<C: Clock> {
    clock: C,
    backoff: Backoff,
}

impl<C: Clock> Poller<C> {
    pub fn new(clock: C, initial_delay: Duration) -> Self {
        Self { clock, backoff: Backoff::new(initial_delay) }
    }

    /// Sleeps for the current delay and grows the next one.
    pub async fn wait(&mut self) {
        let delay = self.backoff.next();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "poll backoff");
        self.clock.sleep(delay).await;
    }

    /// Waits one interval when the previous attempt left the step running,
    /// so transient errors are not retried back to back.
    pub async fn pace(&mut self, previous: &StepStatus) {
        if matches!(previous, StepStatus::Running(_)) {
            self.wait().await;
        }
    }

    pub fn current_delay(&self) -> Duration {
        self.backoff.current()
    }
}

/// Status for a remote error: transient errors keep the step running,
/// anything else fails it.
pub(crate) fn remote_error_status(
    kind: StepKind,
    transient: bool,
    error: impl std::fmt::Display,
) -> StepStatus {
    if transient {
        tracing::warn!(step = %kind, error = %error, "transient error, will retry");
        StepStatus::running(format!("Retrying after error: {error}"))
    } else {
        StepStatus::failed(error.to_string())
    }
}

/// Local precondition failure: a structurally required input is missing.
pub(crate) fn missing_prerequisite(what: &str) -> StepStatus {
    StepStatus::failed(format!("missing prerequisite: {what}"))
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
