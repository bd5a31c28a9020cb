// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plans for bridging from an EVM chain to ICP.
//!
//! Two entry flows share the tail of the plan:
//! - wallet-signed: approve + lock (locker tokens) or burn (minter tokens),
//!   then the canister validates the transaction hash;
//! - forwarding: the sender pays a derived deposit address and the canister
//!   sweeps it, so no wallet is needed.

use crate::deps::{resolve_amount, EvmBridgeDeps, ForwardingDeps};
use crate::error::BuildError;
use crate::plan::BridgingPlan;
use crate::slot::Slot;
use crate::step::{Poller, Step};
use crate::steps::{
    ComputeForwardingAddressStep, ConfirmBlocksStep, ContractCallStep, FetchFeesStep,
    NotifyForwardingPaymentStep, SettlementLeg, ValidateForwardingReceiptStep, ValidateReceiptStep,
    WaitForForwardingTxStep, WaitForSettlementStep,
};
use onesec_adapters::{AddressDeriver, ContractCall, EvmAdapter, SettlementAdapter};
use onesec_core::{
    encode_icrc_account, Chain, Clock, Config, Deployment, EvmAccount, EvmChain, IcrcAccount,
    OperatingMode, Token,
};
use rust_decimal::Decimal;

/// Builder for EVM -> ICP plans.
#[derive(Debug, Clone)]
pub struct EvmToIcpBridgeBuilder {
    chain: EvmChain,
    token: Token,
    deployment: Deployment,
    config: Config,
    sender: Option<String>,
    receiver: Option<IcrcAccount>,
    amount_in_units: Option<u128>,
    amount_in_tokens: Option<Decimal>,
}

impl EvmToIcpBridgeBuilder {
    pub fn new(chain: EvmChain, token: Token) -> Self {
        Self {
            chain,
            token,
            deployment: Deployment::default(),
            config: Config::default(),
            sender: None,
            receiver: None,
            amount_in_units: None,
            amount_in_tokens: None,
        }
    }

    onesec_core::setters! {
        set {
            deployment: Deployment,
            config: Config,
        }
        option {
            sender: String,
            receiver: IcrcAccount,
            amount_in_units: u128,
            amount_in_tokens: Decimal,
        }
    }

    /// Plan signed by the connected EVM wallet:
    /// `[fetch-fees, (approve,) lock | burn, confirm-blocks, validate-receipt, wait-for-icp-tx]`.
    pub async fn build<S, E, C>(
        self,
        deps: EvmBridgeDeps<S, E, C>,
    ) -> Result<BridgingPlan, BuildError>
    where
        S: SettlementAdapter,
        E: EvmAdapter,
        C: Clock,
    {
        let EvmBridgeDeps { settlement, evm, clock } = deps;
        let (token, chain, deployment) = (self.token, self.chain, self.deployment);
        let receiver = self.receiver.ok_or(BuildError::MissingAccount("receiver"))?;
        let decimals = self.config.decimals(token)?;
        let amount = resolve_amount(self.amount_in_units, self.amount_in_tokens, decimals)?
            .ok_or(BuildError::MissingAmount)?;

        let signer = evm.address().await?;
        let sender = match self.sender {
            Some(sender) if !sender.eq_ignore_ascii_case(&signer) => {
                return Err(BuildError::SignerMismatch { expected: sender, actual: signer });
            }
            Some(sender) => sender,
            None => signer,
        };

        let encoded = encode_icrc_account(&receiver)?;
        let erc20 = self.config.erc20_address(token, deployment, chain)?;
        let explorer = self.config.explorer(chain, deployment).map(str::to_string);
        let confirmations = self.config.confirmations(chain, deployment)?;
        let poll_delay = self.config.poll_delay(deployment);
        let poller = || Poller::new(clock.clone(), poll_delay);

        let mut steps: Vec<Box<dyn Step>> = vec![Box::new(
            FetchFeesStep::new(settlement.clone(), poller(), token, chain.into(), Chain::Icp, decimals)
                .amount(Some(amount)),
        )];

        let source_tx = match self.config.mode(token)? {
            OperatingMode::Locker => {
                let locker = self
                    .config
                    .locker_address(token, deployment, chain)?
                    .ok_or(BuildError::MissingLocker { token })?;
                let approve = ContractCallStep::new(
                    evm.clone(),
                    poller(),
                    ContractCall::Approve {
                        token: erc20,
                        spender: locker.clone(),
                        amount: amount.in_units,
                    },
                    chain,
                    format!("Approve {amount} {token} for the OneSec locker on {chain}"),
                )
                .explorer(explorer.clone());
                let lock = ContractCallStep::new(
                    evm,
                    poller(),
                    ContractCall::lock(locker, amount.in_units, encoded.data1, encoded.data2),
                    chain,
                    format!("Lock {amount} {token} on {chain} for {receiver}"),
                )
                .explorer(explorer.clone());
                let tx = lock.evm_tx();
                steps.push(Box::new(approve));
                steps.push(Box::new(lock));
                tx
            }
            OperatingMode::Minter => {
                let burn = ContractCallStep::new(
                    evm,
                    poller(),
                    ContractCall::burn(erc20, amount.in_units, encoded.data1, encoded.data2),
                    chain,
                    format!("Burn {amount} {token} on {chain} for {receiver}"),
                )
                .explorer(explorer.clone());
                let tx = burn.evm_tx();
                steps.push(Box::new(burn));
                tx
            }
        };

        steps.push(Box::new(ConfirmBlocksStep::new(clock.clone(), chain, confirmations)));
        let validate = ValidateReceiptStep::new(
            settlement.clone(),
            poller(),
            token,
            chain,
            EvmAccount::new(sender),
            receiver,
            amount.in_units,
            source_tx,
        );
        let transfer = validate.transfer_id();
        steps.push(Box::new(validate));
        steps.push(Box::new(WaitForSettlementStep::new(
            settlement,
            Poller::new(clock, poll_delay),
            SettlementLeg::IcpDestination,
            token,
            decimals,
            transfer,
        )));

        tracing::info!(%token, %chain, steps = steps.len(), "built EVM -> ICP plan");
        Ok(BridgingPlan::new(steps))
    }

    /// Plan for paying through a forwarding address, no wallet required:
    /// `[fetch-fees, compute-forwarding-address, notify-forwarding-payment,
    /// wait-for-forwarding-tx, confirm-blocks, validate-forwarding-receipt,
    /// wait-for-icp-tx]`.
    ///
    /// The amount is optional; when given, the fee step checks it against
    /// the route's bounds.
    pub fn forward<S, D, C>(self, deps: ForwardingDeps<S, D, C>) -> Result<BridgingPlan, BuildError>
    where
        S: SettlementAdapter,
        D: AddressDeriver,
        C: Clock,
    {
        let ForwardingDeps { settlement, deriver, clock } = deps;
        let (token, chain, deployment) = (self.token, self.chain, self.deployment);
        let receiver = self.receiver.ok_or(BuildError::MissingAccount("receiver"))?;
        let decimals = self.config.decimals(token)?;
        let amount = resolve_amount(self.amount_in_units, self.amount_in_tokens, decimals)?;
        let explorer = self.config.explorer(chain, deployment).map(str::to_string);
        let confirmations = self.config.confirmations(chain, deployment)?;
        let poll_delay = self.config.poll_delay(deployment);
        let poller = || Poller::new(clock.clone(), poll_delay);

        let fees =
            FetchFeesStep::new(settlement.clone(), poller(), token, chain.into(), Chain::Icp, decimals)
                .amount(amount)
                .forwarding(true);
        let compute = ComputeForwardingAddressStep::new(
            settlement.clone(),
            poller(),
            deriver,
            deployment,
            token,
            chain,
            receiver,
        );
        let address = compute.forwarding_address();
        let notify = NotifyForwardingPaymentStep::new(
            settlement.clone(),
            poller(),
            token,
            chain,
            receiver,
            address.clone(),
        );
        let transfer = Slot::new();
        let wait = WaitForForwardingTxStep::new(
            settlement.clone(),
            poller(),
            token,
            chain,
            decimals,
            receiver,
            address.clone(),
            transfer.clone(),
        )
        .explorer(explorer);
        let validate = ValidateForwardingReceiptStep::new(
            settlement.clone(),
            poller(),
            token,
            chain,
            receiver,
            address,
            transfer.clone(),
        );
        let settle = WaitForSettlementStep::new(
            settlement,
            poller(),
            SettlementLeg::IcpDestination,
            token,
            decimals,
            transfer,
        );

        let steps: Vec<Box<dyn Step>> = vec![
            Box::new(fees),
            Box::new(compute),
            Box::new(notify),
            Box::new(wait),
            Box::new(ConfirmBlocksStep::new(clock, chain, confirmations)),
            Box::new(validate),
            Box::new(settle),
        ];
        tracing::info!(%token, %chain, steps = steps.len(), "built forwarding plan");
        Ok(BridgingPlan::new(steps))
    }
}

#[cfg(test)]
#[path = "evm_to_icp_tests.rs"]
mod tests;
