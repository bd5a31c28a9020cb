// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! EVM-side write steps: approve, lock, and burn.

use crate::slot::Slot;
use crate::step::{remote_error_status, Poller, Step, StepCore, StepKind, EVM_CALL_DURATION};
use async_trait::async_trait;
use onesec_adapters::{ContractCall, EvmAdapter};
use onesec_core::{explorer_tx_link, Clock, EvmChain, EvmTx, StepStatus, Succeeded};
use std::time::Duration;

/// One signed contract call, waited on until mined.
///
/// The hash is kept as soon as the call is broadcast, so a failed wait is
/// retried against the same transaction instead of sending a second one.
/// The mined transaction is published to [`evm_tx`](Self::evm_tx) for the
/// receipt validation step; a hash already in that slot is reused as is.
pub struct ContractCallStep<E: EvmAdapter, C: Clock> {
    evm: E,
    poller: Poller<C>,
    call: ContractCall,
    chain: EvmChain,
    details: String,
    explorer: Option<String>,
    sent: Option<EvmTx>,
    output: Slot<EvmTx>,
    status: StepStatus,
}

impl<E: EvmAdapter, C: Clock> ContractCallStep<E, C> {
    pub fn new(
        evm: E,
        poller: Poller<C>,
        call: ContractCall,
        chain: EvmChain,
        details: impl Into<String>,
    ) -> Self {
        Self {
            evm,
            poller,
            call,
            chain,
            details: details.into(),
            explorer: None,
            sent: None,
            output: Slot::new(),
            status: StepStatus::Planned,
        }
    }

    /// Block explorer base URL for the success link.
    pub fn explorer(mut self, explorer: Option<String>) -> Self {
        self.explorer = explorer;
        self
    }

    pub fn call(&self) -> &ContractCall {
        &self.call
    }

    /// Slot receiving the mined transaction.
    pub fn evm_tx(&self) -> Slot<EvmTx> {
        self.output.clone()
    }

    fn executed(&self, tx: EvmTx) -> StepStatus {
        let mut outcome = Succeeded::new(format!(
            "Executed {} on {}: transaction hash {}",
            self.call.entry_point(),
            self.chain,
            tx.hash
        ));
        if let Some(explorer) = &self.explorer {
            outcome = outcome.link(explorer_tx_link(explorer, &tx.hash));
        }
        outcome.tx(tx).into()
    }
}

#[async_trait]
impl<E: EvmAdapter, C: Clock> Step for ContractCallStep<E, C> {
    fn kind(&self) -> StepKind {
        match self.call {
            ContractCall::Approve { .. } => StepKind::Approve,
            ContractCall::Lock1 { .. } | ContractCall::Lock2 { .. } => StepKind::Lock,
            ContractCall::Burn1 { .. } | ContractCall::Burn2 { .. } => StepKind::Burn,
        }
    }

    fn about(&self) -> String {
        match self.call {
            ContractCall::Approve { .. } => format!("Approve transaction on {}", self.chain),
            _ => format!("Submit transaction on {}", self.chain),
        }
    }

    fn details(&self) -> String {
        self.details.clone()
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        EVM_CALL_DURATION
    }
}

#[async_trait]
impl<E: EvmAdapter, C: Clock> StepCore for ContractCallStep<E, C> {
    async fn attempt(&mut self) -> StepStatus {
        if let Some(tx) = self.output.get() {
            tracing::debug!(step = %self.kind(), hash = %tx.hash, "reusing mined transaction");
            return self.executed(tx);
        }
        self.poller.pace(&self.status).await;

        let tx = match self.sent.clone() {
            Some(tx) => {
                tracing::debug!(step = %self.kind(), hash = %tx.hash, "waiting on sent transaction");
                tx
            }
            None => match self.evm.send(self.call.clone()).await {
                Ok(hash) => {
                    let tx = EvmTx::new(hash);
                    self.sent = Some(tx.clone());
                    tx
                }
                Err(e) => return remote_error_status(self.kind(), e.is_transient(), e),
            },
        };

        match self.evm.wait_for_receipt(&tx.hash).await {
            Ok(receipt) if receipt.success => {
                self.output.publish(tx.clone());
                self.executed(tx)
            }
            Ok(_) => {
                // a retry after a revert sends a fresh transaction
                self.sent = None;
                StepStatus::reverted(
                    format!(
                        "Transaction {} on {} has been reverted: {}",
                        self.call.entry_point(),
                        self.chain,
                        tx.hash
                    ),
                    tx,
                )
            }
            Err(e) => remote_error_status(self.kind(), e.is_transient(), e),
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

#[cfg(test)]
#[path = "contract_tests.rs"]
mod tests;
