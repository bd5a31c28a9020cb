// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::step::StepKind;
use onesec_adapters::{FakeSettlementAdapter, SettlementCall, SettlementError};
use onesec_core::test_support::{evm_to_icp_transfer, icp_to_evm_transfer};
use onesec_core::{FakeClock, StepStatus, TransferStatus};

const ID: TransferId = TransferId(42);

fn deps(settlement: &FakeSettlementAdapter) -> ResumeDeps<FakeSettlementAdapter, FakeClock> {
    ResumeDeps { settlement: settlement.clone(), clock: FakeClock::new() }
}

fn builder() -> ResumeBuilder {
    ResumeBuilder::new(EvmChain::Base, Token::Usdc)
}

fn kinds(plan: &BridgingPlan) -> Vec<StepKind> {
    plan.steps().iter().map(|step| step.kind()).collect()
}

#[tokio::test]
async fn icp_to_evm_resumes_the_settlement_waits() {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_transfer(
        ID,
        Ok(icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingDestinationTx)),
    );

    let plan = builder().icp_to_evm(ID, deps(&settlement)).await.unwrap();

    assert_eq!(
        kinds(&plan),
        vec![StepKind::WaitForEvmTx, StepKind::ConfirmBlocks, StepKind::ValidateEvmReceipt]
    );
    assert_eq!(settlement.calls(), vec![SettlementCall::GetTransfer(ID)]);
}

#[tokio::test]
async fn evm_to_icp_resumes_the_icp_wait() {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_transfer(
        ID,
        Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingSourceTx)),
    );

    let plan = builder().evm_to_icp(ID, deps(&settlement)).await.unwrap();

    assert_eq!(kinds(&plan), vec![StepKind::WaitForIcpTx]);
}

#[tokio::test]
async fn missing_destination_account_is_structural() {
    let settlement = FakeSettlementAdapter::new();
    let mut transfer = icp_to_evm_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingSourceTx);
    transfer.destination.account = None;
    settlement.push_transfer(ID, Ok(transfer));

    let err = builder().icp_to_evm(ID, deps(&settlement)).await.unwrap_err();

    assert!(matches!(err, BuildError::MissingDestination("EVM")));
    assert_eq!(err.to_string(), "Could not determine EVM destination address from transfer");
}

#[tokio::test]
async fn unknown_transfer_is_reported() {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_transfer(ID, Err(SettlementError::Rejected("no such transfer".into())));

    let err = builder().evm_to_icp(ID, deps(&settlement)).await.unwrap_err();

    assert_eq!(err.to_string(), "Transfer 42 not found: rejected: no such transfer");
}

#[tokio::test]
async fn direction_is_checked() {
    let settlement = FakeSettlementAdapter::new();
    settlement.push_transfer(
        ID,
        Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingSourceTx)),
    );

    let err = builder().icp_to_evm(ID, deps(&settlement)).await.unwrap_err();

    assert!(matches!(err, BuildError::WrongDirection { id: ID, .. }));
}

#[tokio::test]
async fn resumed_plan_polls_to_completion() {
    let settlement = FakeSettlementAdapter::new();
    settlement
        .push_transfer(ID, Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingSourceTx)))
        .push_transfer(ID, Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::PendingSourceTx)))
        .push_transfer(ID, Ok(evm_to_icp_transfer(Token::Usdc, Chain::Base, TransferStatus::Succeeded)));
    let deps = deps(&settlement);

    let mut plan = builder().evm_to_icp(ID, deps.clone()).await.unwrap();
    let status = plan.run_all_steps().await;

    let StepStatus::Succeeded(outcome) = &status else { panic!("expected success: {status:?}") };
    assert_eq!(outcome.amount.map(|a| a.in_units), Some(990_000));
    // one lookup while resuming, then one pending poll and the settled one
    assert_eq!(settlement.count(|c| matches!(c, SettlementCall::GetTransfer(_))), 3);
}
