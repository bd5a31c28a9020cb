// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete steps.
//!
//! Write steps (approve, lock, burn, notify, ICP transfer) perform one
//! remote action per attempt. Poll steps sleep one backoff interval, read
//! remote state once, and project it into a [`StepStatus`](onesec_core::StepStatus).

mod confirm;
mod contract;
mod fees;
mod forwarding;
mod icp;
mod receipt;
mod settlement;

pub use confirm::{ConfirmBlocksStep, CONFIRM_TICK};
pub use contract::ContractCallStep;
pub use fees::FetchFeesStep;
pub use forwarding::{
    derive_forwarding_address, ComputeForwardingAddressStep, ForwardingAddress,
    NotifyForwardingPaymentStep, ValidateForwardingReceiptStep, WaitForForwardingTxStep,
};
pub use icp::{IcpApproveStep, IcpTransferStep};
pub use receipt::ValidateReceiptStep;
pub use settlement::{SettlementLeg, WaitForSettlementStep};

/// Renders a unit count in tokens, falling back to the raw units.
pub(crate) fn show_units(units: u128, decimals: u8) -> String {
    onesec_core::Amount::from_units(units, decimals)
        .map(|amount| amount.to_string())
        .unwrap_or_else(|_| units.to_string())
}
