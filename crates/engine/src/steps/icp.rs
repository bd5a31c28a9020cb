// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ICP-side write steps for the ICP -> EVM direction.

use super::show_units;
use crate::slot::Slot;
use crate::step::{remote_error_status, Poller, Step, StepCore, StepKind, ICP_CALL_DURATION};
use async_trait::async_trait;
use onesec_adapters::{ApproveRequest, IcpToEvmRequest, LedgerAdapter, SettlementAdapter};
use onesec_core::{Clock, IcpTx, RunningDetail, StepStatus, Succeeded, TransferId, TransferResponse};
use std::time::Duration;

/// `icrc2_approve` letting the settlement canister pull the amount.
pub struct IcpApproveStep<L: LedgerAdapter, C: Clock> {
    ledger: L,
    poller: Poller<C>,
    request: ApproveRequest,
    decimals: u8,
    details: String,
    status: StepStatus,
}

impl<L: LedgerAdapter, C: Clock> IcpApproveStep<L, C> {
    pub fn new(
        ledger: L,
        poller: Poller<C>,
        request: ApproveRequest,
        decimals: u8,
        details: impl Into<String>,
    ) -> Self {
        Self { ledger, poller, request, decimals, details: details.into(), status: StepStatus::Planned }
    }
}

#[async_trait]
impl<L: LedgerAdapter, C: Clock> Step for IcpApproveStep<L, C> {
    fn kind(&self) -> StepKind {
        StepKind::IcpApprove
    }

    fn about(&self) -> String {
        "Approve transaction on ICP".to_string()
    }

    fn details(&self) -> String {
        self.details.clone()
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        ICP_CALL_DURATION
    }
}

#[async_trait]
impl<L: LedgerAdapter, C: Clock> StepCore for IcpApproveStep<L, C> {
    async fn attempt(&mut self) -> StepStatus {
        self.poller.pace(&self.status).await;
        match self.ledger.icrc2_approve(self.request.clone()).await {
            Ok(block_index) => {
                let tx = IcpTx { block_index, ledger: self.request.ledger };
                Succeeded::new(format!(
                    "Approved {} for OneSec: block {block_index}",
                    show_units(self.request.amount, self.decimals)
                ))
                .tx(tx)
                .into()
            }
            Err(e) => remote_error_status(self.kind(), e.is_transient(), format!("failed to approve: {e}")),
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

/// `transfer_icp_to_evm`: the canister pulls the approved tokens and
/// starts the payout. A transfer id already in the slot is reused.
pub struct IcpTransferStep<S: SettlementAdapter, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    request: IcpToEvmRequest,
    ledger: candid::Principal,
    decimals: u8,
    output: Slot<TransferId>,
    status: StepStatus,
}

impl<S: SettlementAdapter, C: Clock> IcpTransferStep<S, C> {
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        request: IcpToEvmRequest,
        ledger: candid::Principal,
        decimals: u8,
    ) -> Self {
        Self {
            settlement,
            poller,
            request,
            ledger,
            decimals,
            output: Slot::new(),
            status: StepStatus::Planned,
        }
    }

    pub fn transfer_id(&self) -> Slot<TransferId> {
        self.output.clone()
    }

    fn accepted(&self, id: TransferId) -> StepStatus {
        Succeeded::new(format!(
            "Transferred {} {} to OneSec on ICP: transfer {id}",
            show_units(self.request.icp_amount, self.decimals),
            self.request.token
        ))
        .tx(IcpTx { block_index: id.0, ledger: self.ledger })
        .into()
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> Step for IcpTransferStep<S, C> {
    fn kind(&self) -> StepKind {
        StepKind::IcpTransfer
    }

    fn about(&self) -> String {
        "Transfer tokens to OneSec on ICP".to_string()
    }

    fn details(&self) -> String {
        format!(
            "Transfer {} {} to OneSec on ICP for bridging to {} on {}",
            show_units(self.request.icp_amount, self.decimals),
            self.request.token,
            self.request.evm_account.address,
            self.request.evm_chain
        )
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        ICP_CALL_DURATION
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> StepCore for IcpTransferStep<S, C> {
    async fn attempt(&mut self) -> StepStatus {
        if let Some(id) = self.output.get() {
            return self.accepted(id);
        }
        self.poller.pace(&self.status).await;
        match self.settlement.transfer_icp_to_evm(self.request.clone()).await {
            Ok(TransferResponse::Accepted(id)) => {
                self.output.publish(id);
                self.accepted(id)
            }
            Ok(TransferResponse::Failed { error }) => StepStatus::failed(format!(
                "Failed to transfer {} on ICP: {error}",
                self.request.token
            )),
            Ok(TransferResponse::Fetching { block_height }) => StepStatus::running_with(
                format!("OneSec is fetching ICP block {block_height}"),
                RunningDetail::Fetching { block_height },
            ),
            Err(e) => remote_error_status(self.kind(), e.is_transient(), e),
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

#[cfg(test)]
#[path = "icp_tests.rs"]
mod tests;
