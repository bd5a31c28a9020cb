// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submits the EVM lock/burn transaction to the settlement canister.

use crate::slot::Slot;
use crate::step::{
    missing_prerequisite, remote_error_status, Poller, Step, StepCore, StepKind,
    ICP_CALL_DURATION,
};
use async_trait::async_trait;
use onesec_adapters::{EvmToIcpRequest, SettlementAdapter};
use onesec_core::{
    Clock, EvmAccount, EvmChain, EvmTx, IcrcAccount, RunningDetail, StepStatus, Succeeded, Token,
    TransferId, TransferResponse,
};
use std::time::Duration;

/// Validates the source transaction and obtains a [`TransferId`].
///
/// Resubmitting the same transaction is safe: the canister deduplicates by
/// transaction hash.
pub struct ValidateReceiptStep<S: SettlementAdapter, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    token: Token,
    chain: EvmChain,
    evm_account: EvmAccount,
    icp_account: IcrcAccount,
    evm_amount: u128,
    source: Slot<EvmTx>,
    output: Slot<TransferId>,
    status: StepStatus,
}

impl<S: SettlementAdapter, C: Clock> ValidateReceiptStep<S, C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        token: Token,
        chain: EvmChain,
        evm_account: EvmAccount,
        icp_account: IcrcAccount,
        evm_amount: u128,
        source: Slot<EvmTx>,
    ) -> Self {
        Self {
            settlement,
            poller,
            token,
            chain,
            evm_account,
            icp_account,
            evm_amount,
            source,
            output: Slot::new(),
            status: StepStatus::Planned,
        }
    }

    /// Slot receiving the accepted transfer id.
    pub fn transfer_id(&self) -> Slot<TransferId> {
        self.output.clone()
    }

    fn accepted(&self, id: TransferId) -> StepStatus {
        Succeeded::new(format!("Validated receipt of the {} transaction: transfer {id}", self.chain))
            .into()
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> Step for ValidateReceiptStep<S, C> {
    fn kind(&self) -> StepKind {
        StepKind::ValidateReceipt
    }

    fn about(&self) -> String {
        "Validate receipt".to_string()
    }

    fn details(&self) -> String {
        format!("Wait for OneSec to validate the receipt of the {} transaction", self.chain)
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        ICP_CALL_DURATION
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> StepCore for ValidateReceiptStep<S, C> {
    async fn attempt(&mut self) -> StepStatus {
        let Some(evm_tx) = self.source.get() else {
            return missing_prerequisite("EVM transaction of the lock or burn step");
        };
        if let Some(id) = self.output.get() {
            return self.accepted(id);
        }

        self.poller.wait().await;
        let request = EvmToIcpRequest {
            token: self.token,
            evm_chain: self.chain,
            evm_account: self.evm_account.clone(),
            evm_tx,
            icp_account: self.icp_account,
            evm_amount: self.evm_amount,
            icp_amount: None,
        };
        match self.settlement.transfer_evm_to_icp(request).await {
            Ok(TransferResponse::Accepted(id)) => {
                self.output.publish(id);
                self.accepted(id)
            }
            Ok(TransferResponse::Failed { error }) => {
                StepStatus::failed(format!("Validation failed: {error}"))
            }
            Ok(TransferResponse::Fetching { block_height }) => StepStatus::running_with(
                format!("OneSec is fetching {} block {block_height}", self.chain),
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
#[path = "receipt_tests.rs"]
mod tests;
