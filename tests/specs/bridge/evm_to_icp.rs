// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wallet-signed EVM -> ICP plans.

use crate::prelude::*;
use onesec_adapters::{EvmError, TxReceipt};
use std::time::Duration;
use onesec_core::IcrcAccount;
use onesec_engine::{EvmBridgeDeps, EvmToIcpBridgeBuilder};
use similar_asserts::assert_eq;

const ID: TransferId = TransferId(7);

fn deps() -> EvmBridgeDeps<FakeSettlementAdapter, FakeEvmAdapter, FakeClock> {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_fees(Ok(vec![route(Chain::Base, Chain::Icp)]));
    EvmBridgeDeps { settlement, evm: FakeEvmAdapter::new(WALLET), clock: FakeClock::new() }
}

fn builder(token: Token) -> EvmToIcpBridgeBuilder {
    EvmToIcpBridgeBuilder::new(EvmChain::Base, token)
        .config(fast_config())
        .receiver(icrc_account(1))
        .amount_in_units(1_500_000u128)
}

#[tokio::test]
async fn locker_token_runs_to_settlement() {
    init_tracing();
    let deps = deps();
    deps.settlement
        .push_evm_to_icp(Ok(TransferResponse::Fetching { block_height: 100 }))
        .push_evm_to_icp(Ok(TransferResponse::Accepted(ID)));
    deps.settlement
        .push_transfer(ID, Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingSourceTx)))
        .push_transfer(ID, Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::Succeeded)));

    let mut plan = builder(Token::Usdc).build(deps.clone()).await.unwrap();
    assert_eq!(
        kinds(&plan),
        vec![
            StepKind::FetchFees,
            StepKind::Approve,
            StepKind::Lock,
            StepKind::ConfirmBlocks,
            StepKind::ValidateReceipt,
            StepKind::WaitForIcpTx,
        ]
    );

    let status = plan.run_all_steps().await;

    let StepStatus::Succeeded(outcome) = &status else { panic!("expected success: {status:?}") };
    assert_eq!(outcome.amount.map(|a| a.in_units), Some(990_000));
    assert!(statuses(&plan).iter().all(StepStatus::is_succeeded));
    assert_eq!(deps.evm.entry_points(), vec!["approve", "lock1"]);
    assert_eq!(plan.expected_fee().map(|fee| fee.transfer_fee.in_units), Some(10_000));

    // The lock transaction is the proof handed to the canister
    let lock_hash = format!("0x{:064x}", 2);
    let submitted: Vec<_> = deps
        .settlement
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            SettlementCall::TransferEvmToIcp(request) => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(submitted.len(), 2);
    assert!(submitted.iter().all(|r| r.evm_tx.hash == lock_hash && r.evm_amount == 1_500_000));
}

#[tokio::test]
async fn reverted_lock_halts_the_plan() {
    let deps = deps();
    deps.evm
        .push_receipt(Ok(TxReceipt { hash: "0xapprove".into(), success: true }))
        .push_receipt(Ok(TxReceipt { hash: "0xlock".into(), success: false }));

    let mut plan = builder(Token::Usdc).build(deps.clone()).await.unwrap();
    let status = plan.run_all_steps().await;

    assert!(matches!(status, StepStatus::Failed(_)), "{status:?}");
    assert_eq!(plan.latest_step().map(|step| step.kind()), Some(StepKind::Lock));
    for _ in 0..3 {
        assert!(plan.next_step_to_run().is_none());
    }
    assert_eq!(statuses(&plan)[3..].to_vec(), vec![StepStatus::Planned; 3]);
    assert_eq!(deps.settlement.count(|c| matches!(c, SettlementCall::TransferEvmToIcp(_))), 0);
}

#[tokio::test]
async fn lost_lock_receipt_is_awaited_without_resending() {
    let deps = deps();
    deps.evm
        .push_receipt(Ok(TxReceipt { hash: "0xapprove".into(), success: true }))
        .push_receipt(Err(EvmError::Transport("timeout".into())))
        .push_receipt(Err(EvmError::Transport("timeout".into())))
        .push_receipt(Ok(TxReceipt { hash: format!("0x{:064x}", 2), success: true }));

    let mut plan = builder(Token::Usdc).build(deps.clone()).await.unwrap();
    for _ in 0..10 {
        let Some(step) = plan.next_step_to_run() else { break };
        if step.kind() == StepKind::ConfirmBlocks {
            break;
        }
        step.run().await;
    }

    assert_eq!(deps.evm.entry_points(), vec!["approve", "lock1"]);
    assert_eq!(deps.clock.sleeps(), vec![Duration::from_millis(1_000), Duration::from_millis(1_200)]);
    assert!(statuses(&plan)[..3].iter().all(StepStatus::is_succeeded));
}

#[tokio::test]
async fn minter_token_burns_with_the_matching_entry_point() {
    let cases = [
        (icrc_account(1), "burn1"),
        (IcrcAccount::with_subaccount(principal(1), Some([7; 32])), "burn2"),
    ];
    for (receiver, entry_point) in cases {
        let deps = deps();
        let mut plan = EvmToIcpBridgeBuilder::new(EvmChain::Base, Token::Icp)
            .config(fast_config())
            .receiver(receiver)
            .amount_in_units(150_000_000u128)
            .build(deps.clone())
            .await
            .unwrap();
        assert_eq!(
            kinds(&plan),
            vec![
                StepKind::FetchFees,
                StepKind::Burn,
                StepKind::ConfirmBlocks,
                StepKind::ValidateReceipt,
                StepKind::WaitForIcpTx,
            ]
        );

        // fetch-fees has no ICP route scripted; drive the burn on its own
        plan.step_mut(1).unwrap().run().await;
        assert_eq!(deps.evm.entry_points(), vec![entry_point]);
    }
}

#[tokio::test]
async fn succeeded_steps_are_not_resubmitted() {
    let deps = deps();
    deps.settlement.push_evm_to_icp(Ok(TransferResponse::Accepted(ID)));
    deps.settlement
        .push_transfer(ID, Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::Succeeded)));

    let mut plan = builder(Token::Usdc).build(deps.clone()).await.unwrap();
    plan.run_all_steps().await;
    let before = statuses(&plan);
    let (evm_calls, settlement_calls) = (deps.evm.calls().len(), deps.settlement.calls().len());

    for index in 0..plan.len() {
        plan.step_mut(index).unwrap().run().await;
    }

    assert_eq!(statuses(&plan), before);
    assert_eq!(deps.evm.calls().len(), evm_calls);
    assert_eq!(deps.settlement.calls().len(), settlement_calls);
}

#[tokio::test]
async fn amount_outside_the_route_bounds_fails_first() {
    let deps = deps();
    let mut plan = builder(Token::Usdc)
        .amount_in_units(50_000u128)
        .build(deps.clone())
        .await
        .unwrap();

    let status = plan.run_all_steps().await;

    assert!(status.description().starts_with("amount is too low"), "{status:?}");
    assert_eq!(plan.latest_step().map(|step| step.kind()), Some(StepKind::FetchFees));
    assert!(deps.evm.calls().is_empty());
}
