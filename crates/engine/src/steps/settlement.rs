// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polls a transfer by id until the settlement canister reports an outcome.

use super::show_units;
use crate::slot::Slot;
use crate::step::{
    missing_prerequisite, remote_error_status, Poller, Step, StepCore, StepKind, ICP_CALL_DURATION,
};
use async_trait::async_trait;
use onesec_adapters::SettlementAdapter;
use onesec_core::{
    explorer_tx_link, Amount, Clock, DestinationProgress, EvmChain, RunningDetail, StepStatus,
    Succeeded, Token, Transfer, TransferId, TransferStatus, Tx,
};
use std::time::Duration;

/// Which part of a transfer the wait covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementLeg {
    /// EVM -> ICP: the payout on ICP.
    IcpDestination,
    /// ICP -> EVM: the payout transaction on `chain`, with trace progress.
    EvmDestination { chain: EvmChain },
    /// ICP -> EVM: final validation after the payout was confirmed.
    EvmReceipt { chain: EvmChain },
}

/// Projects the remote transfer state into a step status.
///
/// Only remote `Succeeded`, `Failed` and `Refunded` end the step. Trace
/// progress ("signed", "sent", "confirmed") is surfaced as running detail.
pub struct WaitForSettlementStep<S: SettlementAdapter, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    leg: SettlementLeg,
    token: Token,
    decimals: u8,
    transfer: Slot<TransferId>,
    explorer: Option<String>,
    progress: DestinationProgress,
    status: StepStatus,
}

impl<S: SettlementAdapter, C: Clock> WaitForSettlementStep<S, C> {
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        leg: SettlementLeg,
        token: Token,
        decimals: u8,
        transfer: Slot<TransferId>,
    ) -> Self {
        Self {
            settlement,
            poller,
            leg,
            token,
            decimals,
            transfer,
            explorer: None,
            progress: DestinationProgress::Unknown,
            status: StepStatus::Planned,
        }
    }

    /// Block explorer base URL for links to the EVM payout.
    pub fn explorer(mut self, explorer: Option<String>) -> Self {
        self.explorer = explorer;
        self
    }

    fn settled(&self, transfer: Transfer) -> StepStatus {
        let amount = show_units(transfer.destination.amount, self.decimals);
        let description = match self.leg {
            SettlementLeg::IcpDestination => format!("Transferred {amount} {} on ICP", self.token),
            SettlementLeg::EvmDestination { chain } => {
                format!("Executed transaction sending {amount} {} on {chain}", self.token)
            }
            SettlementLeg::EvmReceipt { chain } => {
                format!("Validated receipt of the {chain} transaction")
            }
        };
        let mut outcome = Succeeded::new(description);
        if let Ok(amount) = Amount::from_units(transfer.destination.amount, self.decimals) {
            outcome = outcome.amount(amount);
        }
        if let (Some(Tx::Evm(tx)), Some(explorer)) = (&transfer.destination.tx, &self.explorer) {
            outcome = outcome.link(explorer_tx_link(explorer, &tx.hash));
        }
        if let Some(tx) = transfer.destination.tx {
            outcome = outcome.tx(tx);
        }
        outcome.into()
    }

    fn pending_destination(&mut self, transfer: &Transfer) -> StepStatus {
        let SettlementLeg::EvmDestination { chain } = self.leg else {
            return StepStatus::running("Waiting for the destination transaction");
        };
        self.progress = self.progress.max(transfer.destination_progress(chain));
        StepStatus::running_with(self.progress.to_string(), RunningDetail::Destination(self.progress))
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> Step for WaitForSettlementStep<S, C> {
    fn kind(&self) -> StepKind {
        match self.leg {
            SettlementLeg::IcpDestination => StepKind::WaitForIcpTx,
            SettlementLeg::EvmDestination { .. } => StepKind::WaitForEvmTx,
            SettlementLeg::EvmReceipt { .. } => StepKind::ValidateEvmReceipt,
        }
    }

    fn about(&self) -> String {
        match self.leg {
            SettlementLeg::IcpDestination => "Wait for transaction on ICP".to_string(),
            SettlementLeg::EvmDestination { chain } => format!("Wait for transaction on {chain}"),
            SettlementLeg::EvmReceipt { .. } => "Validate receipt".to_string(),
        }
    }

    fn details(&self) -> String {
        match self.leg {
            SettlementLeg::IcpDestination => {
                format!("Wait for OneSec to transfer {} on ICP", self.token)
            }
            SettlementLeg::EvmDestination { chain } => format!(
                "Wait for OneSec to sign and submit a transaction sending {} on {chain}",
                self.token
            ),
            SettlementLeg::EvmReceipt { chain } => {
                format!("Wait for OneSec to validate the {chain} transaction receipt")
            }
        }
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        match self.leg {
            // sign, send, then read back
            SettlementLeg::EvmDestination { .. } => ICP_CALL_DURATION * 3,
            _ => ICP_CALL_DURATION,
        }
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> StepCore for WaitForSettlementStep<S, C> {
    async fn attempt(&mut self) -> StepStatus {
        let Some(id) = self.transfer.get() else {
            return missing_prerequisite("transfer id");
        };

        self.poller.wait().await;
        let transfer = match self.settlement.get_transfer(id).await {
            Ok(transfer) => transfer,
            Err(e) => return remote_error_status(self.kind(), e.is_transient(), e),
        };

        match transfer.status.clone() {
            Some(TransferStatus::Succeeded) => self.settled(transfer),
            Some(TransferStatus::Failed { error }) => {
                StepStatus::failed(format!("Transfer {id} failed: {error}"))
            }
            Some(TransferStatus::Refunded(tx)) => StepStatus::refunded(
                format!("Refunded {} due to a bridging issue", self.token),
                tx.or(transfer.source.tx),
            ),
            Some(TransferStatus::PendingRefundTx) => {
                StepStatus::running(format!("Refunding {} due to a bridging issue", self.token))
            }
            Some(TransferStatus::PendingDestinationTx) => self.pending_destination(&transfer),
            Some(TransferStatus::PendingSourceTx) | None => StepStatus::running_with(
                format!("Waiting for transfer {id}"),
                RunningDetail::Transfer(id),
            ),
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

#[cfg(test)]
#[path = "settlement_tests.rs"]
mod tests;
