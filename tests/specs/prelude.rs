// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the bridge scenarios.

pub use onesec_adapters::{
    FakeDeriver, FakeEvmAdapter, FakeLedgerAdapter, FakeSettlementAdapter, SettlementCall,
};
pub use onesec_core::test_support::{evm_to_icp_transfer, icp_to_evm_transfer, icrc_account, principal};
pub use onesec_core::{
    Chain, Config, Deployment, EvmChain, FakeClock, StepStatus, Token, TransferFee, TransferId,
    TransferResponse, TransferStatus,
};
pub use onesec_engine::{BridgingPlan, StepKind};
pub use rust_decimal::Decimal;

pub const WALLET: &str = "0x00000000000000000000000000000000000000e1";

/// Built-in tables with fast blocks, so confirmations take a couple of ticks.
pub fn fast_config() -> Config {
    let mut config = Config::default();
    for evm in config.evm.values_mut() {
        for block_time in evm.block_time_ms.values_mut() {
            *block_time = 100;
        }
    }
    config
}

/// A USDC route with generous bounds.
pub fn route(source: Chain, destination: Chain) -> TransferFee {
    TransferFee::builder()
        .token(Token::Usdc)
        .source_chain(source)
        .destination_chain(destination)
        .min_amount(100_000)
        .max_amount(100_000_000)
        .available(Some(50_000_000))
        .latest_transfer_fee(10_000)
        .protocol_fee_in_percent(Decimal::new(1, 3))
        .build()
}

pub fn kinds(plan: &BridgingPlan) -> Vec<StepKind> {
    plan.steps().iter().map(|step| step.kind()).collect()
}

pub fn statuses(plan: &BridgingPlan) -> Vec<StepStatus> {
    plan.steps().iter().map(|step| step.status().clone()).collect()
}

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
