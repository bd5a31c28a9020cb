// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resuming a transfer from its id.

use crate::prelude::*;
use onesec_engine::{BuildError, ResumeBuilder, ResumeDeps};
use similar_asserts::assert_eq;

const ID: TransferId = TransferId(21);

fn deps(settlement: &FakeSettlementAdapter) -> ResumeDeps<FakeSettlementAdapter, FakeClock> {
    ResumeDeps { settlement: settlement.clone(), clock: FakeClock::new() }
}

fn builder() -> ResumeBuilder {
    ResumeBuilder::new(EvmChain::Base, Token::Usdc).config(fast_config())
}

#[tokio::test]
async fn no_destination_account_produces_no_plan() {
    let settlement = FakeSettlementAdapter::new();
    let mut transfer = icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingDestinationTx);
    transfer.destination.account = None;
    settlement.push_transfer(ID, Ok(transfer));

    let result = builder().icp_to_evm(ID, deps(&settlement)).await;

    assert!(matches!(result, Err(BuildError::MissingDestination("EVM"))), "{result:?}");
    assert_eq!(settlement.calls(), vec![SettlementCall::GetTransfer(ID)]);
}

#[tokio::test]
async fn resumed_icp_to_evm_plan_finishes() {
    let settlement = FakeSettlementAdapter::new();
    settlement
        .push_transfer(ID, Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingDestinationTx)))
        .push_transfer(ID, Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingDestinationTx)))
        .push_transfer(ID, Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::Succeeded)));

    let mut plan = builder().icp_to_evm(ID, deps(&settlement)).await.unwrap();
    assert_eq!(
        kinds(&plan),
        vec![StepKind::WaitForEvmTx, StepKind::ConfirmBlocks, StepKind::ValidateEvmReceipt]
    );

    let status = plan.run_all_steps().await;

    assert!(status.is_succeeded(), "{status:?}");
    assert!(settlement.calls().iter().all(|c| *c == SettlementCall::GetTransfer(ID)));
}

#[tokio::test]
async fn remote_failure_is_surfaced_on_the_step() {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_transfer(
        ID,
        Ok(evm_to_icp_transfer(
            Token::Usdc,
            Chain::Base,
            TransferStatus::Failed { error: "ledger unavailable".into() },
        )),
    );

    let mut plan = builder().evm_to_icp(ID, deps(&settlement)).await.unwrap();
    let status = plan.run_all_steps().await;

    assert_eq!(status, StepStatus::failed("Transfer 21 failed: ledger unavailable"));
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["Failed"]["error"].as_str(), Some("Transfer 21 failed: ledger unavailable"));
}
