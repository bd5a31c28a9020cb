// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! onesec-adapters: boundaries to the settlement canister, EVM contracts,
//! ICRC ledgers, and forwarding-address derivation

pub mod derive;
pub mod evm;
pub mod ledger;
pub mod settlement;

#[cfg(any(test, feature = "test-support"))]
mod script;

pub use derive::{AddressDeriver, DeriveError};
pub use evm::{ContractCall, EvmAdapter, EvmError, TxReceipt};
pub use ledger::{ApproveRequest, LedgerAdapter, LedgerError};
pub use settlement::{
    EvmToIcpRequest, ForwardingRequest, IcpToEvmRequest, SettlementAdapter, SettlementError,
    TransfersQuery,
};

#[cfg(any(test, feature = "test-support"))]
pub use derive::FakeDeriver;
#[cfg(any(test, feature = "test-support"))]
pub use evm::{EvmCall, FakeEvmAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use ledger::{FakeLedgerAdapter, LedgerCall};
#[cfg(any(test, feature = "test-support"))]
pub use settlement::{FakeSettlementAdapter, SettlementCall};
