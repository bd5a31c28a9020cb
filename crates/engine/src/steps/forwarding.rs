// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forwarding-address flow: tokens sent to a derived deposit address are
//! swept into the bridge by the settlement canister, no wallet needed.

use super::show_units;
use crate::slot::Slot;
use crate::step::{
    missing_prerequisite, remote_error_status, Poller, Step, StepCore, StepKind, EVM_CALL_DURATION,
    ICP_CALL_DURATION,
};
use async_trait::async_trait;
use onesec_adapters::{AddressDeriver, DeriveError, ForwardingRequest, SettlementAdapter};
use onesec_core::{
    explorer_tx_link, Clock, Deployment, EvmChain, ForwardingStatus, IcrcAccount, RunningDetail,
    StepStatus, Succeeded, Token, TransferId,
};
use std::time::Duration;

/// A derived forwarding address, and the newest transfer the canister had
/// already created from it when the address was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingAddress {
    pub address: String,
    pub last_transfer_id: Option<TransferId>,
}

impl ForwardingAddress {
    /// `done` when it names a transfer newer than the last one seen.
    fn newer(&self, done: Option<TransferId>) -> Option<TransferId> {
        done.filter(|id| match self.last_transfer_id {
            Some(last) => *id > last,
            None => true,
        })
    }
}

/// The forwarding address for `receiver` on `deployment`.
pub fn derive_forwarding_address<D: AddressDeriver>(
    deriver: &D,
    deployment: Deployment,
    receiver: &IcrcAccount,
) -> Result<String, DeriveError> {
    deriver.derive_address(
        deployment.forwarding_key_id(),
        receiver.owner.as_slice(),
        &receiver.effective_subaccount(),
    )
}

fn request(token: Token, chain: EvmChain, address: String, receiver: IcrcAccount) -> ForwardingRequest {
    ForwardingRequest { token, chain, address, receiver }
}

pub struct ComputeForwardingAddressStep<S: SettlementAdapter, D: AddressDeriver, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    deriver: D,
    deployment: Deployment,
    token: Token,
    chain: EvmChain,
    receiver: IcrcAccount,
    output: Slot<ForwardingAddress>,
    status: StepStatus,
}

impl<S: SettlementAdapter, D: AddressDeriver, C: Clock> ComputeForwardingAddressStep<S, D, C> {
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        deriver: D,
        deployment: Deployment,
        token: Token,
        chain: EvmChain,
        receiver: IcrcAccount,
    ) -> Self {
        Self {
            settlement,
            poller,
            deriver,
            deployment,
            token,
            chain,
            receiver,
            output: Slot::new(),
            status: StepStatus::Planned,
        }
    }

    pub fn forwarding_address(&self) -> Slot<ForwardingAddress> {
        self.output.clone()
    }

    fn computed(address: &ForwardingAddress) -> StepStatus {
        Succeeded::new(format!("Computed forwarding address: {}", address.address))
            .forwarding_address(address.address.clone())
            .into()
    }
}

#[async_trait]
impl<S: SettlementAdapter, D: AddressDeriver, C: Clock> Step
    for ComputeForwardingAddressStep<S, D, C>
{
    fn kind(&self) -> StepKind {
        StepKind::ComputeForwardingAddress
    }

    fn about(&self) -> String {
        format!("Compute forwarding address on {}", self.chain)
    }

    fn details(&self) -> String {
        format!(
            "Compute the forwarding address on {} for bridging {} to {} on ICP",
            self.chain, self.token, self.receiver
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
impl<S: SettlementAdapter, D: AddressDeriver, C: Clock> StepCore
    for ComputeForwardingAddressStep<S, D, C>
{
    async fn attempt(&mut self) -> StepStatus {
        if let Some(existing) = self.output.get() {
            return Self::computed(&existing);
        }
        self.poller.pace(&self.status).await;
        let address = match derive_forwarding_address(&self.deriver, self.deployment, &self.receiver)
        {
            Ok(address) => address,
            Err(e) => return StepStatus::failed(e.to_string()),
        };
        if let Err(e) = self.settlement.validate_forwarding_address(&self.receiver, &address).await {
            return remote_error_status(self.kind(), e.is_transient(), e);
        }
        let query = request(self.token, self.chain, address.clone(), self.receiver);
        let response = match self.settlement.get_forwarding_status(&query).await {
            Ok(response) => response,
            Err(e) => return remote_error_status(self.kind(), e.is_transient(), e),
        };

        let computed = ForwardingAddress { address, last_transfer_id: response.done };
        self.output.publish(computed.clone());
        Self::computed(&computed)
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

/// Tells the canister that the user paid into the forwarding address.
pub struct NotifyForwardingPaymentStep<S: SettlementAdapter, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    token: Token,
    chain: EvmChain,
    receiver: IcrcAccount,
    address: Slot<ForwardingAddress>,
    status: StepStatus,
}

impl<S: SettlementAdapter, C: Clock> NotifyForwardingPaymentStep<S, C> {
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        token: Token,
        chain: EvmChain,
        receiver: IcrcAccount,
        address: Slot<ForwardingAddress>,
    ) -> Self {
        Self { settlement, poller, token, chain, receiver, address, status: StepStatus::Planned }
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> Step for NotifyForwardingPaymentStep<S, C> {
    fn kind(&self) -> StepKind {
        StepKind::NotifyForwardingPayment
    }

    fn about(&self) -> String {
        format!("Notify user payment on {}", self.chain)
    }

    fn details(&self) -> String {
        format!(
            "Notify OneSec about the {} payment to the forwarding address on {}",
            self.token, self.chain
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
impl<S: SettlementAdapter, C: Clock> StepCore for NotifyForwardingPaymentStep<S, C> {
    async fn attempt(&mut self) -> StepStatus {
        let Some(forwarding) = self.address.get() else {
            return missing_prerequisite("forwarding address");
        };
        self.poller.pace(&self.status).await;
        let notify = request(self.token, self.chain, forwarding.address.clone(), self.receiver);
        match self.settlement.forward_evm_to_icp(&notify).await {
            Ok(_) => Succeeded::new(format!("Notified payment to {}", forwarding.address)).into(),
            Err(e) => remote_error_status(self.kind(), e.is_transient(), e),
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

/// Waits until the canister has swept the forwarding address.
pub struct WaitForForwardingTxStep<S: SettlementAdapter, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    token: Token,
    chain: EvmChain,
    decimals: u8,
    receiver: IcrcAccount,
    address: Slot<ForwardingAddress>,
    output: Slot<TransferId>,
    explorer: Option<String>,
    status: StepStatus,
}

impl<S: SettlementAdapter, C: Clock> WaitForForwardingTxStep<S, C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        token: Token,
        chain: EvmChain,
        decimals: u8,
        receiver: IcrcAccount,
        address: Slot<ForwardingAddress>,
        output: Slot<TransferId>,
    ) -> Self {
        Self {
            settlement,
            poller,
            token,
            chain,
            decimals,
            receiver,
            address,
            output,
            explorer: None,
            status: StepStatus::Planned,
        }
    }

    pub fn explorer(mut self, explorer: Option<String>) -> Self {
        self.explorer = explorer;
        self
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> Step for WaitForForwardingTxStep<S, C> {
    fn kind(&self) -> StepKind {
        StepKind::WaitForForwardingTx
    }

    fn about(&self) -> String {
        "Wait for forwarding transaction".to_string()
    }

    fn details(&self) -> String {
        format!(
            "Wait for OneSec to detect the {} payment to the forwarding address and move it to the bridge on {}",
            self.token, self.chain
        )
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        ICP_CALL_DURATION + EVM_CALL_DURATION
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> StepCore for WaitForForwardingTxStep<S, C> {
    async fn attempt(&mut self) -> StepStatus {
        let Some(forwarding) = self.address.get() else {
            return missing_prerequisite("forwarding address");
        };

        self.poller.wait().await;
        let query = request(self.token, self.chain, forwarding.address.clone(), self.receiver);
        let response = match self.settlement.get_forwarding_status(&query).await {
            Ok(response) => response,
            Err(e) => return remote_error_status(self.kind(), e.is_transient(), e),
        };

        if let Some(id) = forwarding.newer(response.done) {
            self.output.publish(id);
            return Succeeded::new(format!("Forwarded {} to the bridge: transfer {id}", self.token))
                .into();
        }
        match response.status {
            Some(ForwardingStatus::Forwarded(tx)) => {
                let mut outcome = Succeeded::new(format!("Forwarded {} to the bridge", self.token));
                if let Some(explorer) = &self.explorer {
                    outcome = outcome.link(explorer_tx_link(explorer, &tx.hash));
                }
                outcome.tx(tx).into()
            }
            Some(ForwardingStatus::Forwarding) => StepStatus::running(
                "OneSec is moving tokens from the forwarding address to the bridge",
            ),
            Some(ForwardingStatus::LowBalance { balance, min_amount }) if balance > 0 => {
                StepStatus::failed(format!(
                    "Balance of the forwarding address is too low: {}, required at least {}",
                    show_units(balance, self.decimals),
                    show_units(min_amount, self.decimals)
                ))
            }
            Some(ForwardingStatus::LowBalance { balance, min_amount }) => StepStatus::running_with(
                "Checking balance of the forwarding address",
                RunningDetail::Balance { balance, min_amount },
            ),
            Some(ForwardingStatus::CheckingBalance) | None => {
                StepStatus::running("Checking balance of the forwarding address")
            }
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

/// Waits for the canister to create the transfer for the swept tokens.
///
/// Shares its output slot with [`WaitForForwardingTxStep`]; when that step
/// already saw the new transfer, this one succeeds without polling.
pub struct ValidateForwardingReceiptStep<S: SettlementAdapter, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    token: Token,
    chain: EvmChain,
    receiver: IcrcAccount,
    address: Slot<ForwardingAddress>,
    output: Slot<TransferId>,
    status: StepStatus,
}

impl<S: SettlementAdapter, C: Clock> ValidateForwardingReceiptStep<S, C> {
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        token: Token,
        chain: EvmChain,
        receiver: IcrcAccount,
        address: Slot<ForwardingAddress>,
        output: Slot<TransferId>,
    ) -> Self {
        Self { settlement, poller, token, chain, receiver, address, output, status: StepStatus::Planned }
    }

    fn validated(&self, id: TransferId) -> StepStatus {
        Succeeded::new(format!("Validated receipt of the {} transaction: transfer {id}", self.chain))
            .into()
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> Step for ValidateForwardingReceiptStep<S, C> {
    fn kind(&self) -> StepKind {
        StepKind::ValidateForwardingReceipt
    }

    fn about(&self) -> String {
        "Validate receipt".to_string()
    }

    fn details(&self) -> String {
        format!("Wait for OneSec to validate the receipt of the {} forwarding transaction", self.chain)
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }

    fn expected_duration(&self) -> Duration {
        ICP_CALL_DURATION
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> StepCore for ValidateForwardingReceiptStep<S, C> {
    async fn attempt(&mut self) -> StepStatus {
        let Some(forwarding) = self.address.get() else {
            return missing_prerequisite("forwarding address");
        };
        if let Some(id) = self.output.get() {
            return self.validated(id);
        }

        self.poller.wait().await;
        let query = request(self.token, self.chain, forwarding.address.clone(), self.receiver);
        let response = match self.settlement.get_forwarding_status(&query).await {
            Ok(response) => response,
            Err(e) => return remote_error_status(self.kind(), e.is_transient(), e),
        };
        match forwarding.newer(response.done) {
            Some(id) => {
                self.output.publish(id);
                self.validated(id)
            }
            None => StepStatus::running(format!(
                "Waiting for OneSec to validate the receipt of the {} transaction",
                self.chain
            )),
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

#[cfg(test)]
#[path = "forwarding_tests.rs"]
mod tests;
