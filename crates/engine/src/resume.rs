// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rebuilds the tail of a plan from a transfer id after the process that
//! started the transfer is gone.
//!
//! Only the settlement waits are rebuilt: the write steps already ran in
//! the earlier process, and the transfer id is all the canister needs.

use crate::deps::ResumeDeps;
use crate::error::BuildError;
use crate::plan::BridgingPlan;
use crate::slot::Slot;
use crate::step::{Poller, Step};
use crate::steps::{ConfirmBlocksStep, SettlementLeg, WaitForSettlementStep};
use onesec_adapters::SettlementAdapter;
use onesec_core::{Account, Chain, Clock, Config, Deployment, EvmChain, Token, Transfer, TransferId};

#[derive(Debug, Clone)]
pub struct ResumeBuilder {
    chain: EvmChain,
    token: Token,
    deployment: Deployment,
    config: Config,
}

impl ResumeBuilder {
    pub fn new(chain: EvmChain, token: Token) -> Self {
        Self { chain, token, deployment: Deployment::default(), config: Config::default() }
    }

    onesec_core::setters! {
        set {
            deployment: Deployment,
            config: Config,
        }
    }

    /// `[wait-for-evm-tx, confirm-blocks, validate-evm-receipt]` for an
    /// ICP -> EVM transfer.
    pub async fn icp_to_evm<S, C>(
        self,
        id: TransferId,
        deps: ResumeDeps<S, C>,
    ) -> Result<BridgingPlan, BuildError>
    where
        S: SettlementAdapter,
        C: Clock,
    {
        let ResumeDeps { settlement, clock } = deps;
        let (token, chain, deployment) = (self.token, self.chain, self.deployment);
        let transfer = lookup(&settlement, id).await?;
        if transfer.source.chain.is_some_and(|c| c != Chain::Icp) {
            return Err(BuildError::WrongDirection { id, expected: "ICP to EVM" });
        }
        let receiver = transfer
            .destination
            .account
            .as_ref()
            .and_then(Account::as_evm)
            .ok_or(BuildError::MissingDestination("EVM"))?;

        let decimals = self.config.decimals(token)?;
        let explorer = self.config.explorer(chain, deployment).map(str::to_string);
        let confirmations = self.config.confirmations(chain, deployment)?;
        let poll_delay = self.config.poll_delay(deployment);
        let slot = Slot::filled(id);

        let steps: Vec<Box<dyn Step>> = vec![
            Box::new(
                WaitForSettlementStep::new(
                    settlement.clone(),
                    Poller::new(clock.clone(), poll_delay),
                    SettlementLeg::EvmDestination { chain },
                    token,
                    decimals,
                    slot.clone(),
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
                    slot,
                )
                .explorer(explorer),
            ),
        ];
        tracing::info!(
            %id,
            receiver = %receiver.address,
            destination_tx = ?transfer.destination.tx,
            "resumed ICP -> EVM plan"
        );
        Ok(BridgingPlan::new(steps))
    }

    /// `[wait-for-icp-tx]` for an EVM -> ICP transfer.
    pub async fn evm_to_icp<S, C>(
        self,
        id: TransferId,
        deps: ResumeDeps<S, C>,
    ) -> Result<BridgingPlan, BuildError>
    where
        S: SettlementAdapter,
        C: Clock,
    {
        let ResumeDeps { settlement, clock } = deps;
        let token = self.token;
        let transfer = lookup(&settlement, id).await?;
        if transfer.destination.chain.is_some_and(|c| c != Chain::Icp) {
            return Err(BuildError::WrongDirection { id, expected: "EVM to ICP" });
        }
        let receiver = transfer
            .destination
            .account
            .as_ref()
            .and_then(Account::as_icrc)
            .ok_or(BuildError::MissingDestination("ICP"))?;

        let decimals = self.config.decimals(token)?;
        let steps: Vec<Box<dyn Step>> = vec![Box::new(WaitForSettlementStep::new(
            settlement,
            Poller::new(clock, self.config.poll_delay(self.deployment)),
            SettlementLeg::IcpDestination,
            token,
            decimals,
            Slot::filled(id),
        ))];
        tracing::info!(
            %id,
            %receiver,
            destination_tx = ?transfer.destination.tx,
            "resumed EVM -> ICP plan"
        );
        Ok(BridgingPlan::new(steps))
    }
}

async fn lookup<S: SettlementAdapter>(settlement: &S, id: TransferId) -> Result<Transfer, BuildError> {
    settlement
        .get_transfer(id)
        .await
        .map_err(|e| BuildError::TransferNotFound { id, reason: e.to_string() })
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
