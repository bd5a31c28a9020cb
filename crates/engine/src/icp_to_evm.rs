// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plans for bridging from ICP to an EVM chain.

use crate::deps::{resolve_amount, IcpBridgeDeps};
use crate::error::BuildError;
use crate::plan::BridgingPlan;
use crate::step::{Poller, Step};
use crate::steps::{
    ConfirmBlocksStep, FetchFeesStep, IcpApproveStep, IcpTransferStep, SettlementLeg,
    WaitForSettlementStep,
};
use onesec_adapters::{ApproveRequest, IcpToEvmRequest, LedgerAdapter, SettlementAdapter};
use onesec_core::{Amount, Chain, Clock, Config, Deployment, EvmAccount, EvmChain, IcrcAccount, Token};
use rust_decimal::Decimal;

/// Builder for ICP -> EVM plans.
#[derive(Debug, Clone)]
pub struct IcpToEvmBridgeBuilder {
    chain: EvmChain,
    token: Token,
    deployment: Deployment,
    config: Config,
    pay_approve_fee_from_amount: bool,
    sender: Option<IcrcAccount>,
    receiver: Option<String>,
    amount_in_units: Option<u128>,
    amount_in_tokens: Option<Decimal>,
}

impl IcpToEvmBridgeBuilder {
    pub fn new(chain: EvmChain, token: Token) -> Self {
        Self {
            chain,
            token,
            deployment: Deployment::default(),
            config: Config::default(),
            pay_approve_fee_from_amount: false,
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
            pay_approve_fee_from_amount: bool,
        }
        option {
            sender: IcrcAccount,
            receiver: String,
            amount_in_units: u128,
            amount_in_tokens: Decimal,
        }
    }

    /// `[fetch-fees, icp-approve, icp-transfer, wait-for-evm-tx, confirm-blocks,
    /// validate-evm-receipt]`.
    ///
    /// With `pay_approve_fee_from_amount`, the ledger fee of the approval is
    /// taken out of the bridged amount, as long as the amount covers it.
    pub async fn build<S, L, C>(
        self,
        deps: IcpBridgeDeps<S, L, C>,
    ) -> Result<BridgingPlan, BuildError>
    where
        S: SettlementAdapter,
        L: LedgerAdapter,
        C: Clock,
    {
        let IcpBridgeDeps { settlement, ledger, clock } = deps;
        let (token, chain, deployment) = (self.token, self.chain, self.deployment);
        let receiver = self.receiver.ok_or(BuildError::MissingAccount("receiver"))?;
        let token_config = self.config.token(token)?;
        let decimals = token_config.decimals;
        let mut amount = resolve_amount(self.amount_in_units, self.amount_in_tokens, decimals)?
            .ok_or(BuildError::MissingAmount)?;

        let caller = ledger.principal().await?;
        let sender = match self.sender {
            Some(sender) if sender.owner != caller => {
                return Err(BuildError::SignerMismatch {
                    expected: sender.owner.to_text(),
                    actual: caller.to_text(),
                });
            }
            Some(sender) => sender,
            None => IcrcAccount::new(caller),
        };

        let ledger_fee = u128::from(token_config.ledger_fee);
        if self.pay_approve_fee_from_amount && amount.in_units >= ledger_fee {
            amount = Amount::from_units(amount.in_units - ledger_fee, decimals)?;
        }

        let ledger_canister = self.config.ledger_canister(token, deployment)?;
        let onesec = self.config.onesec_canister(deployment)?;
        let explorer = self.config.explorer(chain, deployment).map(str::to_string);
        let confirmations = self.config.confirmations(chain, deployment)?;
        let poll_delay = self.config.poll_delay(deployment);
        let poller = || Poller::new(clock.clone(), poll_delay);

        let approve = IcpApproveStep::new(
            ledger,
            poller(),
            ApproveRequest {
                ledger: ledger_canister,
                spender: onesec,
                amount: amount.in_units,
                from_subaccount: sender.subaccount,
            },
            decimals,
            format!("Approve {amount} {token} for OneSec on ICP"),
        );
        let transfer = IcpTransferStep::new(
            settlement.clone(),
            poller(),
            IcpToEvmRequest {
                token,
                evm_chain: chain,
                evm_account: EvmAccount::new(receiver),
                icp_account: sender,
                icp_amount: amount.in_units,
                evm_amount: None,
            },
            ledger_canister,
            decimals,
        );
        let id = transfer.transfer_id();

        let steps: Vec<Box<dyn Step>> = vec![
            Box::new(
                FetchFeesStep::new(settlement.clone(), poller(), token, Chain::Icp, chain.into(), decimals)
                    .amount(Some(amount)),
            ),
            Box::new(approve),
            Box::new(transfer),
            Box::new(
                WaitForSettlementStep::new(
                    settlement.clone(),
                    poller(),
                    SettlementLeg::EvmDestination { chain },
                    token,
                    decimals,
                    id.clone(),
                )
                .explorer(explorer.clone()),
            ),
            Box::new(ConfirmBlocksStep::new(clock.clone(), chain, confirmations)),
            Box::new(
                WaitForSettlementStep::new(
                    settlement,
                    Poller::new(clock, poll_delay),
                    SettlementLeg::EvmReceipt { chain },
                    token,
                    decimals,
                    id,
                )
                .explorer(explorer),
            ),
        ];
        tracing::info!(%token, %chain, steps = steps.len(), "built ICP -> EVM plan");
        Ok(BridgingPlan::new(steps))
    }
}

#[cfg(test)]
#[path = "icp_to_evm_tests.rs"]
mod tests;
