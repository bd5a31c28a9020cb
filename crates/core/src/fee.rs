// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fee table entries, amount limits, and the fee a transfer should expect.

use crate::amount::{Amount, AmountError};
use crate::chain::{Chain, Token};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One route of the settlement canister's fee table. Amounts are in units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFee {
    pub token: Token,
    pub source_chain: Chain,
    pub destination_chain: Chain,
    pub min_amount: u128,
    pub max_amount: u128,
    /// Liquidity on the destination side, when the canister tracks it.
    pub available: Option<u128>,
    pub latest_transfer_fee: u128,
    pub average_transfer_fee: u128,
    /// Fraction of the amount, e.g. `0.001` for 0.1%.
    pub protocol_fee_in_percent: Decimal,
}

impl TransferFee {
    pub fn matches(&self, token: Token, source: Chain, destination: Chain) -> bool {
        self.token == token && self.source_chain == source && self.destination_chain == destination
    }
}

crate::builder! {
    pub struct TransferFeeBuilder => TransferFee {
        set {
            token: Token = Token::Usdc,
            source_chain: Chain = Chain::Base,
            destination_chain: Chain = Chain::Icp,
            min_amount: u128 = 0,
            max_amount: u128 = 1_000_000_000_000,
            available: Option<u128> = None,
            latest_transfer_fee: u128 = 0,
            average_transfer_fee: u128 = 0,
            protocol_fee_in_percent: Decimal = Decimal::ZERO,
        }
    }
}

pub fn find_fee(
    fees: &[TransferFee],
    token: Token,
    source: Chain,
    destination: Chain,
) -> Option<&TransferFee> {
    fees.iter().find(|fee| fee.matches(token, source, destination))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeCheckError {
    #[error("bridging {token} from {source_chain} to {destination_chain} is not supported")]
    Unsupported { token: Token, source_chain: Chain, destination_chain: Chain },
    #[error("amount is too low: {amount} < {min}")]
    TooLow { amount: String, min: String },
    #[error("amount is too high: {amount} > {max}")]
    TooHigh { amount: String, max: String },
    #[error("insufficient balance on destination chain: {amount} > {available}")]
    InsufficientLiquidity { amount: String, available: String },
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Checks `amount` against the route's bounds and destination liquidity.
pub fn check_amount(fee: &TransferFee, amount: &Amount, decimals: u8) -> Result<(), FeeCheckError> {
    let show = |units: u128| -> Result<String, FeeCheckError> {
        Ok(Amount::from_units(units, decimals)?.to_string())
    };
    if amount.in_units < fee.min_amount {
        return Err(FeeCheckError::TooLow { amount: amount.to_string(), min: show(fee.min_amount)? });
    }
    if amount.in_units > fee.max_amount {
        return Err(FeeCheckError::TooHigh { amount: amount.to_string(), max: show(fee.max_amount)? });
    }
    if let Some(available) = fee.available {
        if amount.in_units > available {
            return Err(FeeCheckError::InsufficientLiquidity {
                amount: amount.to_string(),
                available: show(available)?,
            });
        }
    }
    Ok(())
}

/// Fee a transfer is expected to pay, fixed at fee-check time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedFee {
    pub transfer_fee: Amount,
    pub protocol_fee_in_percent: Decimal,
    pub decimals: u8,
}

impl ExpectedFee {
    pub fn new(
        transfer_fee_units: u128,
        protocol_fee_in_percent: Decimal,
        decimals: u8,
    ) -> Result<Self, AmountError> {
        Ok(Self {
            transfer_fee: Amount::from_units(transfer_fee_units, decimals)?,
            protocol_fee_in_percent,
            decimals,
        })
    }

    /// The protocol fee as a human percentage (`0.001` -> `0.1`).
    pub fn protocol_fee_percent(&self) -> Decimal {
        self.protocol_fee_in_percent * Decimal::ONE_HUNDRED
    }

    /// Protocol fee for `amount`, rounded down to whole units.
    pub fn protocol_fee(&self, amount: &Amount) -> Result<Amount, AmountError> {
        let overflow =
            || AmountError::Overflow { value: amount.in_units.to_string(), decimals: self.decimals };
        let units = i128::try_from(amount.in_units).map_err(|_| overflow())?;
        let units = Decimal::try_from_i128_with_scale(units, 0).map_err(|_| overflow())?;
        let fee = units
            .checked_mul(self.protocol_fee_in_percent)
            .ok_or_else(overflow)?
            .floor()
            .to_u128()
            .ok_or_else(overflow)?;
        Amount::from_units(fee, self.decimals)
    }

    pub fn total_fee(&self, amount: &Amount) -> Result<Amount, AmountError> {
        let protocol = self.protocol_fee(amount)?;
        Amount::from_units(self.transfer_fee.in_units + protocol.in_units, self.decimals)
    }
}

#[cfg(test)]
#[path = "fee_tests.rs"]
mod tests;
