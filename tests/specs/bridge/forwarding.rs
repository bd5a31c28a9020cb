// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! EVM -> ICP through a forwarding address.

use crate::prelude::*;
use onesec_core::{EvmTx, ForwardingResponse, ForwardingStatus};
use onesec_engine::{forwarding_address, EvmToIcpBridgeBuilder, ForwardingDeps};
use similar_asserts::assert_eq;

fn deps() -> ForwardingDeps<FakeSettlementAdapter, FakeDeriver, FakeClock> {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_fees(Ok(vec![route(Chain::Base, Chain::Icp), route(Chain::Icp, Chain::Base)]));
    ForwardingDeps { settlement, deriver: FakeDeriver, clock: FakeClock::new() }
}

fn builder() -> EvmToIcpBridgeBuilder {
    EvmToIcpBridgeBuilder::new(EvmChain::Base, Token::Usdc)
        .config(fast_config())
        .receiver(icrc_account(1))
}

fn response(done: u64, status: Option<ForwardingStatus>) -> ForwardingResponse {
    ForwardingResponse { done: Some(TransferId(done)), status }
}

#[tokio::test]
async fn forwarded_payment_runs_to_settlement() {
    init_tracing();
    let deps = deps();
    deps.settlement
        // seen when the address is computed: transfer 3 predates this payment
        .push_forwarding_status(Ok(response(3, None)))
        .push_forwarding_status(Ok(response(3, Some(ForwardingStatus::CheckingBalance))))
        .push_forwarding_status(Ok(response(3, Some(ForwardingStatus::Forwarding))))
        .push_forwarding_status(Ok(response(4, Some(ForwardingStatus::Forwarded(EvmTx::new("0xsweep"))))));
    deps.settlement.push_forward(Ok(ForwardingResponse::default()));
    deps.settlement.push_transfer(
        TransferId(4),
        Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::Succeeded)),
    );

    let mut plan = builder().forward(deps.clone()).unwrap();
    let status = plan.run_all_steps().await;

    assert!(status.is_succeeded(), "{status:?}");
    let expected = forwarding_address(&deps.settlement, &deps.deriver, Deployment::Mainnet, &icrc_account(1))
        .await
        .unwrap();
    assert_eq!(plan.forwarding_address(), Some(expected));
    // reverse-route fee: the sweep is itself an ICP -> Base transfer
    assert_eq!(plan.expected_fee().map(|fee| fee.transfer_fee.in_units), Some(10_000));
    assert_eq!(
        deps.settlement.count(|c| matches!(c, SettlementCall::GetTransfer(TransferId(4)))),
        1
    );
}

#[tokio::test]
async fn low_balance_is_final_when_something_arrived() {
    let deps = deps();
    deps.settlement
        .push_forwarding_status(Ok(ForwardingResponse::default()))
        .push_forwarding_status(Ok(ForwardingResponse {
            done: None,
            status: Some(ForwardingStatus::LowBalance { balance: 50_000, min_amount: 100_000 }),
        }));
    deps.settlement.push_forward(Ok(ForwardingResponse::default()));

    let mut plan = builder().forward(deps.clone()).unwrap();
    let status = plan.run_all_steps().await;

    assert_eq!(
        status,
        StepStatus::failed(
            "Balance of the forwarding address is too low: 0.05, required at least 0.1"
        )
    );
    assert_eq!(plan.latest_step().map(|step| step.kind()), Some(StepKind::WaitForForwardingTx));
}

#[tokio::test]
async fn amount_is_checked_when_given() {
    let deps = deps();
    let mut plan = builder().amount_in_tokens(Decimal::new(500, 0)).forward(deps.clone()).unwrap();

    let status = plan.run_all_steps().await;

    assert!(status.description().starts_with("amount is too high"), "{status:?}");
    assert_eq!(deps.settlement.count(|c| matches!(c, SettlementCall::GetForwardingStatus(_))), 0);
}
