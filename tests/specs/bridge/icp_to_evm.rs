// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ICP -> EVM plans.

use crate::prelude::*;
use onesec_adapters::LedgerError;
use onesec_core::{RunningDetail, TraceEntry, TraceEvent};
use onesec_engine::{IcpBridgeDeps, IcpToEvmBridgeBuilder};
use similar_asserts::assert_eq;

const ID: TransferId = TransferId(9);

fn deps() -> IcpBridgeDeps<FakeSettlementAdapter, FakeLedgerAdapter, FakeClock> {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_fees(Ok(vec![route(Chain::Icp, Chain::Base)]));
    IcpBridgeDeps { settlement, ledger: FakeLedgerAdapter::new(principal(1)), clock: FakeClock::new() }
}

fn builder() -> IcpToEvmBridgeBuilder {
    IcpToEvmBridgeBuilder::new(EvmChain::Base, Token::Usdc)
        .config(fast_config())
        .receiver(WALLET)
        .amount_in_tokens(Decimal::new(15, 1))
}

fn signed() -> onesec_core::Transfer {
    let mut transfer =
        icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingDestinationTx);
    transfer.trace.push(TraceEntry {
        chain: Some(Chain::Base),
        event: Some(TraceEvent::SignTx),
        result: Some(Ok(())),
    });
    transfer
}

#[tokio::test]
async fn payout_is_tracked_to_the_receipt() {
    init_tracing();
    let deps = deps();
    deps.settlement.push_icp_to_evm(Ok(TransferResponse::Accepted(ID)));
    deps.settlement
        .push_transfer(ID, Ok(signed()))
        .push_transfer(ID, Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::Succeeded)));

    let mut plan = builder().build(deps.clone()).await.unwrap();

    // fees, approve, transfer, then the first payout poll
    for _ in 0..4 {
        plan.next_step_to_run().unwrap().run().await;
    }
    let waiting = plan.next_step_to_run().unwrap();
    assert_eq!(waiting.kind(), StepKind::WaitForEvmTx);
    let StepStatus::Running(running) = waiting.status() else {
        panic!("expected running: {:?}", waiting.status())
    };
    assert!(matches!(running.detail, Some(RunningDetail::Destination(_))));

    let status = plan.run_all_steps().await;

    assert!(status.is_succeeded(), "{status:?}");
    let payout = plan.steps()[3].status().clone();
    let StepStatus::Succeeded(outcome) = &payout else { panic!("expected payout: {payout:?}") };
    assert_eq!(outcome.link.as_deref(), Some("https://basescan.org/tx/0xdest"));
    assert_eq!(outcome.amount.map(|a| a.in_units), Some(990_000));
}

#[tokio::test]
async fn refund_halts_the_plan() {
    let deps = deps();
    deps.settlement.push_icp_to_evm(Ok(TransferResponse::Accepted(ID)));
    deps.settlement
        .push_transfer(ID, Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingRefundTx)))
        .push_transfer(ID, Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::Refunded(None))));

    let mut plan = builder().build(deps.clone()).await.unwrap();
    let status = plan.run_all_steps().await;

    assert!(matches!(status, StepStatus::Refunded(_)), "{status:?}");
    assert_eq!(plan.retry().await, None);
    assert!(plan.next_step_to_run().is_none());
}

#[tokio::test]
async fn failed_approval_can_be_retried() {
    let deps = deps();
    deps.ledger
        .push_approval(Err(LedgerError::Rejected("InsufficientFunds".into())))
        .push_approval(Ok(12));
    deps.settlement.push_icp_to_evm(Ok(TransferResponse::Accepted(ID)));
    deps.settlement
        .push_transfer(ID, Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::Succeeded)));

    let mut plan = builder().build(deps.clone()).await.unwrap();
    let first = plan.run_all_steps().await;
    assert_eq!(first, StepStatus::failed("failed to approve: rejected: InsufficientFunds"));

    let retried = plan.retry().await.unwrap();
    assert!(retried.is_succeeded(), "{retried:?}");
    assert!(plan.run_all_steps().await.is_succeeded());
    assert_eq!(deps.ledger.calls().len(), 2);
}
