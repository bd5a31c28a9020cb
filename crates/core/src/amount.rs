// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token amounts in two equivalent representations.
//!
//! `in_units` (the smallest denomination) is the source of truth;
//! `in_tokens` is always `in_units * 10^-decimals`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of fractional digits shown by [`format_tokens`].
pub const DISPLAY_DECIMALS: u32 = 6;

/// Errors converting between units and tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount does not fit a {decimals}-decimal token: {value}")]
    Overflow { value: String, decimals: u8 },
    #[error("amount {value} has more than {decimals} fractional digits")]
    TooPrecise { value: String, decimals: u8 },
    #[error("amount must not be negative: {0}")]
    Negative(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    pub in_units: u128,
    pub in_tokens: Decimal,
}

impl Amount {
    pub fn from_units(units: u128, decimals: u8) -> Result<Self, AmountError> {
        Ok(Self { in_units: units, in_tokens: units_to_tokens(units, decimals)? })
    }

    pub fn from_tokens(tokens: Decimal, decimals: u8) -> Result<Self, AmountError> {
        let in_units = tokens_to_units(tokens, decimals)?;
        Self::from_units(in_units, decimals)
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.in_units.cmp(&other.in_units)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_tokens(self.in_tokens))
    }
}

pub fn units_to_tokens(units: u128, decimals: u8) -> Result<Decimal, AmountError> {
    let overflow = || AmountError::Overflow { value: units.to_string(), decimals };
    let mantissa = i128::try_from(units).map_err(|_| overflow())?;
    Decimal::try_from_i128_with_scale(mantissa, u32::from(decimals)).map_err(|_| overflow())
}

pub fn tokens_to_units(tokens: Decimal, decimals: u8) -> Result<u128, AmountError> {
    if tokens.is_sign_negative() && !tokens.is_zero() {
        return Err(AmountError::Negative(tokens.to_string()));
    }
    let normalized = tokens.normalize();
    let scale = normalized.scale();
    let target = u32::from(decimals);
    if scale > target {
        return Err(AmountError::TooPrecise { value: tokens.to_string(), decimals });
    }
    let overflow = || AmountError::Overflow { value: tokens.to_string(), decimals };
    let factor = 10i128.checked_pow(target - scale).ok_or_else(overflow)?;
    let units = normalized.mantissa().checked_mul(factor).ok_or_else(overflow)?;
    u128::try_from(units).map_err(|_| overflow())
}

/// Human display: rounded to six fractional digits, trailing zeros trimmed,
/// always at least one digit after the point.
pub fn format_tokens(tokens: Decimal) -> String {
    let rounded = tokens
        .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
#[path = "amount_tests.rs"]
mod tests;
