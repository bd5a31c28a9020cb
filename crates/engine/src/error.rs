// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised before a plan runs: assembling or resuming a plan, and the
//! standalone forwarding and history queries.
//!
//! Errors that happen while a plan runs never surface here; they end up in
//! the status of the step that hit them.

use onesec_adapters::{DeriveError, EvmError, LedgerError, SettlementError};
use onesec_core::{AccountError, AmountError, ConfigError, Token, TransferId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Provide amount of tokens to bridge")]
    MissingAmount,
    #[error("amount in units ({units}) and amount in tokens ({tokens}) disagree")]
    ConflictingAmounts { units: u128, tokens: String },
    #[error("{0} is required")]
    MissingAccount(&'static str),
    #[error("signer {actual} does not match sender {expected}")]
    SignerMismatch { expected: String, actual: String },
    #[error("{token} has no locker contract")]
    MissingLocker { token: Token },
    #[error("Transfer {id} not found: {reason}")]
    TransferNotFound { id: TransferId, reason: String },
    #[error("Could not determine {0} destination address from transfer")]
    MissingDestination(&'static str),
    #[error("transfer {id} is not an {expected} transfer")]
    WrongDirection { id: TransferId, expected: &'static str },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("settlement error: {0}")]
    Settlement(#[from] SettlementError),
    #[error("EVM signer error: {0}")]
    Evm(#[from] EvmError),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Derive(#[from] DeriveError),
}
