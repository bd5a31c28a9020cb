// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter bundles handed to the plan builders.

use crate::error::BuildError;
use onesec_core::Amount;
use rust_decimal::Decimal;

/// Dependencies of the wallet-signed EVM -> ICP flow.
#[derive(Clone)]
pub struct EvmBridgeDeps<S, E, C> {
    pub settlement: S,
    pub evm: E,
    pub clock: C,
}

/// Dependencies of the ICP -> EVM flow.
#[derive(Clone)]
pub struct IcpBridgeDeps<S, L, C> {
    pub settlement: S,
    pub ledger: L,
    pub clock: C,
}

/// Dependencies of the forwarding-address flow.
#[derive(Clone)]
pub struct ForwardingDeps<S, D, C> {
    pub settlement: S,
    pub deriver: D,
    pub clock: C,
}

/// Dependencies of a resumed plan.
#[derive(Clone)]
pub struct ResumeDeps<S, C> {
    pub settlement: S,
    pub clock: C,
}

/// Reconciles an amount given in units, in tokens, or both.
///
/// Both may be given only when they denote the same amount.
pub(crate) fn resolve_amount(
    in_units: Option<u128>,
    in_tokens: Option<Decimal>,
    decimals: u8,
) -> Result<Option<Amount>, BuildError> {
    match (in_units, in_tokens) {
        (None, None) => Ok(None),
        (Some(units), None) => Ok(Some(Amount::from_units(units, decimals)?)),
        (None, Some(tokens)) => Ok(Some(Amount::from_tokens(tokens, decimals)?)),
        (Some(units), Some(tokens)) => {
            let from_tokens = Amount::from_tokens(tokens, decimals)?;
            if from_tokens.in_units != units {
                return Err(BuildError::ConflictingAmounts { units, tokens: tokens.to_string() });
            }
            Ok(Some(from_tokens))
        }
    }
}

#[cfg(test)]
#[path = "deps_tests.rs"]
mod tests;
