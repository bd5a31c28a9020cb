// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! onesec-engine: bridging plans and the steps they drive

pub mod env;
mod error;
mod plan;
mod slot;
mod step;
pub mod steps;

mod deps;
mod evm_to_icp;
mod forwarding;
mod history;
mod icp_to_evm;
mod resume;

pub use deps::{EvmBridgeDeps, ForwardingDeps, IcpBridgeDeps, ResumeDeps};
pub use error::BuildError;
pub use evm_to_icp::EvmToIcpBridgeBuilder;
pub use forwarding::{forwarding_address, notify_forwarding_payment};
pub use history::get_transfers;
pub use icp_to_evm::IcpToEvmBridgeBuilder;
pub use plan::BridgingPlan;
pub use resume::ResumeBuilder;
pub use slot::Slot;
pub use step::{Poller, Step, StepKind, EVM_CALL_DURATION, ICP_CALL_DURATION};
