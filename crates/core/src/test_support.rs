// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::account::{Account, EvmAccount, IcrcAccount};
use crate::chain::{Chain, Token};
use crate::transfer::{AssetInfo, Transfer, TransferStatus};
use crate::tx::{EvmTx, IcpTx, Tx};
use candid::Principal;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::amount::Amount;
    use crate::status::{RunningDetail, StepStatus, Succeeded};
    use crate::tx::{EvmTx, Tx};
    use proptest::prelude::*;

    pub fn arb_amount() -> impl Strategy<Value = Amount> {
        (0u128..1_000_000_000_000, 0u8..=18)
            .prop_filter_map("fits decimal", |(units, decimals)| {
                Amount::from_units(units, decimals).ok()
            })
    }

    pub fn arb_tx() -> impl Strategy<Value = Tx> {
        "0x[0-9a-f]{8}".prop_map(|hash| Tx::Evm(EvmTx::new(hash)))
    }

    pub fn arb_step_status() -> impl Strategy<Value = StepStatus> {
        prop_oneof![
            Just(StepStatus::Planned),
            "[a-z ]{0,12}".prop_map(|s: String| StepStatus::running(s)),
            (0u64..100, 1u64..100).prop_map(|(confirmed, required)| {
                StepStatus::running_with("confirming", RunningDetail::Blocks { confirmed, required })
            }),
            (proptest::option::of(arb_tx()), proptest::option::of(arb_amount())).prop_map(
                |(tx, amount)| {
                    let mut outcome = Succeeded::new("done");
                    outcome.tx = tx;
                    outcome.amount = amount;
                    StepStatus::Succeeded(outcome)
                }
            ),
            "[a-z ]{1,12}".prop_map(|s: String| StepStatus::failed(s)),
            proptest::option::of(arb_tx()).prop_map(|tx| StepStatus::refunded("refunded", tx)),
        ]
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// A stable test principal derived from `seed`.
pub fn principal(seed: u8) -> Principal {
    Principal::from_slice(&[seed, 0xab, 0xcd, 0x01, 0x01])
}

pub fn icrc_account(seed: u8) -> IcrcAccount {
    IcrcAccount::new(principal(seed))
}

/// ICP -> EVM transfer snapshot with the given status.
pub fn icp_to_evm_transfer(token: Token, chain: Chain, status: TransferStatus) -> Transfer {
    Transfer {
        source: AssetInfo {
            chain: Some(Chain::Icp),
            token: Some(token),
            account: Some(Account::from(icrc_account(1))),
            amount: 1_000_000,
            tx: None,
        },
        destination: AssetInfo {
            chain: Some(chain),
            token: Some(token),
            account: Some(Account::from(EvmAccount::new("0x00000000000000000000000000000000000000e1"))),
            amount: 990_000,
            tx: match status {
                TransferStatus::Succeeded => Some(Tx::Evm(EvmTx::new("0xdest"))),
                _ => None,
            },
        },
        status: Some(status),
        trace: Vec::new(),
    }
}

/// EVM -> ICP transfer snapshot with the given status.
pub fn evm_to_icp_transfer(token: Token, chain: Chain, status: TransferStatus) -> Transfer {
    let settled = matches!(status, TransferStatus::Succeeded);
    Transfer {
        source: AssetInfo {
            chain: Some(chain),
            token: Some(token),
            account: Some(Account::from(EvmAccount::new("0x00000000000000000000000000000000000000e1"))),
            amount: 1_000_000,
            tx: Some(Tx::Evm(EvmTx::new("0xsource"))),
        },
        destination: AssetInfo {
            chain: Some(Chain::Icp),
            token: Some(token),
            account: Some(Account::from(icrc_account(1))),
            amount: 990_000,
            tx: settled.then(|| Tx::Icp(IcpTx { block_index: 7, ledger: principal(9) })),
        },
        status: Some(status),
        trace: Vec::new(),
    }
}
