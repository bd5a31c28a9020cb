// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fee table lookup and amount limits.

use crate::step::{remote_error_status, Poller, Step, StepCore, StepKind, ICP_CALL_DURATION};
use async_trait::async_trait;
use onesec_adapters::SettlementAdapter;
use onesec_core::{
    check_amount, find_fee, Amount, Chain, Clock, ExpectedFee, FeeCheckError, StepStatus, Succeeded,
    Token, TransferFee,
};
use std::time::Duration;

/// Reads the fee table and checks the amount against the route's limits.
///
/// In the forwarding flow the sweep out of the forwarding address is
/// itself a transfer in the opposite direction, so the expected transfer
/// fee comes from the reverse route.
pub struct FetchFeesStep<S: SettlementAdapter, C: Clock> {
    settlement: S,
    poller: Poller<C>,
    token: Token,
    source: Chain,
    destination: Chain,
    decimals: u8,
    amount: Option<Amount>,
    forwarding: bool,
    status: StepStatus,
}

impl<S: SettlementAdapter, C: Clock> FetchFeesStep<S, C> {
    pub fn new(
        settlement: S,
        poller: Poller<C>,
        token: Token,
        source: Chain,
        destination: Chain,
        decimals: u8,
    ) -> Self {
        Self {
            settlement,
            poller,
            token,
            source,
            destination,
            decimals,
            amount: None,
            forwarding: false,
            status: StepStatus::Planned,
        }
    }

    pub fn amount(mut self, amount: Option<Amount>) -> Self {
        self.amount = amount;
        self
    }

    pub fn forwarding(mut self, forwarding: bool) -> Self {
        self.forwarding = forwarding;
        self
    }

    fn unsupported(&self) -> FeeCheckError {
        FeeCheckError::Unsupported {
            token: self.token,
            source_chain: self.source,
            destination_chain: self.destination,
        }
    }

    fn evaluate(&self, fees: &[TransferFee]) -> Result<Succeeded, FeeCheckError> {
        let fee = find_fee(fees, self.token, self.source, self.destination)
            .ok_or_else(|| self.unsupported())?;
        if let Some(amount) = &self.amount {
            check_amount(fee, amount, self.decimals)?;
        }
        let transfer_fee = if self.forwarding {
            find_fee(fees, self.token, self.destination, self.source)
                .ok_or_else(|| self.unsupported())?
                .latest_transfer_fee
        } else {
            fee.latest_transfer_fee
        };
        let expected = ExpectedFee::new(transfer_fee, fee.protocol_fee_in_percent, self.decimals)?;
        Ok(Succeeded::new(format!(
            "Expected fees: transfer={} {}, protocol={}%",
            expected.transfer_fee,
            self.token,
            expected.protocol_fee_percent().normalize()
        ))
        .expected_fee(expected))
    }
}

#[async_trait]
impl<S: SettlementAdapter, C: Clock> Step for FetchFeesStep<S, C> {
    fn kind(&self) -> StepKind {
        StepKind::FetchFees
    }

    fn about(&self) -> String {
        "Fetch fees and check limits".to_string()
    }

    fn details(&self) -> String {
        format!(
            "Fetch fees and check limits for {} from {} to {}",
            self.token, self.source, self.destination
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
impl<S: SettlementAdapter, C: Clock> StepCore for FetchFeesStep<S, C> {
    async fn attempt(&mut self) -> StepStatus {
        self.poller.pace(&self.status).await;
        match self.settlement.get_transfer_fees().await {
            Ok(fees) => match self.evaluate(&fees) {
                Ok(outcome) => outcome.into(),
                Err(e) => StepStatus::failed(e.to_string()),
            },
            Err(e) => remote_error_status(self.kind(), e.is_transient(), e),
        }
    }

    fn record(&mut self, status: StepStatus) {
        self.status = status;
    }
}

#[cfg(test)]
#[path = "fees_tests.rs"]
mod tests;
