// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use onesec_adapters::{FakeSettlementAdapter, SettlementCall};
use onesec_core::test_support::icrc_account;
use onesec_core::FakeClock;

fn step(
    settlement: &FakeSettlementAdapter,
    source: Slot<EvmTx>,
) -> (ValidateReceiptStep<FakeSettlementAdapter, FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    let step = ValidateReceiptStep::new(
        settlement.clone(),
        Poller::new(clock.clone(), Duration::from_millis(1_000)),
        Token::Usdc,
        EvmChain::Base,
        EvmAccount::new("0xme"),
        icrc_account(1),
        1_500_000,
        source,
    );
    (step, clock)
}

#[tokio::test]
async fn missing_source_tx_fails_without_a_call() {
    let settlement = FakeSettlementAdapter::new();
    let (mut step, clock) = step(&settlement, Slot::new());

    let status = step.run().await;

    assert!(matches!(status, StepStatus::Failed(ref f) if f.error.starts_with("missing prerequisite")));
    assert!(settlement.calls().is_empty());
    assert!(clock.sleeps().is_empty());
}

#[tokio::test]
async fn fetching_then_accepted() {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_evm_to_icp(Ok(TransferResponse::Fetching { block_height: 41 }));
    settlement.push_evm_to_icp(Ok(TransferResponse::Accepted(TransferId(9))));
    let (mut step, clock) = step(&settlement, Slot::filled(EvmTx::new("0xlock")));
    let transfer_id = step.transfer_id();

    let first = step.run().await;
    assert!(matches!(
        first,
        StepStatus::Running(ref r) if r.detail == Some(RunningDetail::Fetching { block_height: 41 })
    ));
    assert!(step.run().await.is_succeeded());

    assert_eq!(transfer_id.get(), Some(TransferId(9)));
    assert_eq!(clock.sleeps(), vec![Duration::from_millis(1_000), Duration::from_millis(1_200)]);
    let SettlementCall::TransferEvmToIcp(request) = &settlement.calls()[0] else {
        panic!("expected transfer_evm_to_icp");
    };
    assert_eq!(request.evm_tx, EvmTx::new("0xlock"));
    assert_eq!(request.evm_amount, 1_500_000);
}

#[tokio::test]
async fn rejection_is_terminal() {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_evm_to_icp(Ok(TransferResponse::Failed { error: "unknown tx".into() }));
    let (mut step, _) = step(&settlement, Slot::filled(EvmTx::new("0xlock")));

    assert_eq!(step.run().await, StepStatus::failed("Validation failed: unknown tx"));
}

#[tokio::test]
async fn known_transfer_id_skips_resubmission() {
    let settlement = FakeSettlementAdapter::new();
    let (mut step, _) = step(&settlement, Slot::filled(EvmTx::new("0xlock")));
    step.transfer_id().publish(TransferId(3));

    assert!(step.run().await.is_succeeded());
    assert!(settlement.calls().is_empty());
}
