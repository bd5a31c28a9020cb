// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::strategies::arb_step_status;
use crate::tx::EvmTx;
use proptest::prelude::*;

#[yare::parameterized(
    planned = { StepStatus::Planned, StepStatusKind::Planned, false, false },
    running = { StepStatus::running("polling"), StepStatusKind::Running, false, false },
    succeeded = { StepStatus::from(Succeeded::new("done")), StepStatusKind::Succeeded, true, false },
    failed = { StepStatus::failed("boom"), StepStatusKind::Failed, true, true },
    refunded = { StepStatus::refunded("returned", None), StepStatusKind::Refunded, true, true },
)]
fn status_classification(status: StepStatus, kind: StepStatusKind, terminal: bool, halting: bool) {
    assert_eq!(status.kind(), kind);
    assert_eq!(status.is_terminal(), terminal);
    assert_eq!(status.is_halting(), halting);
}

#[test]
fn reverted_keeps_transaction() {
    let status = StepStatus::reverted("transaction reverted: 0x1", EvmTx::new("0x1"));
    assert_eq!(status.tx(), Some(&Tx::Evm(EvmTx::new("0x1"))));
    assert_eq!(status.to_string(), "failed: transaction reverted: 0x1");
}

#[test]
fn succeeded_setters_fill_optional_fields() {
    let outcome = Succeeded::new("locked")
        .tx(EvmTx::new("0xabc"))
        .link("https://basescan.org/tx/0xabc")
        .forwarding_address("0xfeed");
    assert_eq!(outcome.tx, Some(Tx::Evm(EvmTx::new("0xabc"))));
    assert_eq!(outcome.link.as_deref(), Some("https://basescan.org/tx/0xabc"));
    assert_eq!(outcome.forwarding_address.as_deref(), Some("0xfeed"));
    assert_eq!(outcome.amount, None);
}

#[test]
fn running_has_no_tx() {
    let status =
        StepStatus::running_with("waiting", RunningDetail::Blocks { confirmed: 1, required: 4 });
    assert_eq!(status.tx(), None);
}

#[test]
fn default_is_planned() {
    assert_eq!(StepStatus::default(), StepStatus::Planned);
    assert_eq!(StepStatus::Planned.to_string(), "planned");
}

proptest! {
    #[test]
    fn kind_terminality_matches_status(status in arb_step_status()) {
        prop_assert_eq!(status.kind().is_terminal(), status.is_terminal());
        if status.is_halting() {
            prop_assert!(status.is_terminal());
            prop_assert!(!status.is_succeeded());
        }
    }
}
