// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshots returned by the settlement canister.
//!
//! The remote side owns the authoritative transfer state machine; these
//! types mirror what it reports so steps can project it into a
//! [`StepStatus`](crate::status::StepStatus).

use crate::account::Account;
use crate::chain::{Chain, EvmChain, Token};
use crate::tx::{EvmTx, TransferId, Tx};
use serde::{Deserialize, Serialize};

/// Remote settlement state of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    PendingSourceTx,
    PendingDestinationTx,
    PendingRefundTx,
    Succeeded,
    Refunded(Option<Tx>),
    Failed { error: String },
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferStatus::PendingSourceTx => f.write_str("pending source transaction"),
            TransferStatus::PendingDestinationTx => f.write_str("pending destination transaction"),
            TransferStatus::PendingRefundTx => f.write_str("pending refund"),
            TransferStatus::Succeeded => f.write_str("succeeded"),
            TransferStatus::Refunded(_) => f.write_str("refunded"),
            TransferStatus::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

impl TransferStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferStatus::Succeeded | TransferStatus::Refunded(_) | TransferStatus::Failed { .. }
        )
    }
}

/// One side (source or destination) of a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub chain: Option<Chain>,
    pub token: Option<Token>,
    pub account: Option<Account>,
    /// Amount in token units.
    pub amount: u128,
    pub tx: Option<Tx>,
}

/// What the settlement canister was doing in a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    FetchTx,
    SignTx,
    SendTx,
    PendingConfirmTx,
    ConfirmTx,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub chain: Option<Chain>,
    pub event: Option<TraceEvent>,
    /// `Err` carries the remote error text.
    pub result: Option<Result<(), String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub source: AssetInfo,
    pub destination: AssetInfo,
    pub status: Option<TransferStatus>,
    #[serde(default)]
    pub trace: Vec<TraceEntry>,
}

/// How far the destination transaction has progressed, read off the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DestinationProgress {
    Unknown,
    Signed,
    Sent,
    Executed,
}

crate::simple_display! {
    DestinationProgress {
        Unknown => "waiting for destination transaction",
        Signed => "destination transaction signed",
        Sent => "destination transaction sent",
        Executed => "destination transaction confirmed",
    }
}

impl Transfer {
    /// Furthest successful trace event on `chain`.
    pub fn destination_progress(&self, chain: EvmChain) -> DestinationProgress {
        let chain = Chain::from(chain);
        self.trace
            .iter()
            .filter(|entry| entry.chain == Some(chain) && matches!(entry.result, Some(Ok(()))))
            .filter_map(|entry| entry.event)
            .map(|event| match event {
                TraceEvent::FetchTx => DestinationProgress::Unknown,
                TraceEvent::SignTx => DestinationProgress::Signed,
                TraceEvent::SendTx => DestinationProgress::Sent,
                TraceEvent::PendingConfirmTx | TraceEvent::ConfirmTx => {
                    DestinationProgress::Executed
                }
            })
            .max()
            .unwrap_or(DestinationProgress::Unknown)
    }
}

/// Reply to "validate this source transaction" / "start this transfer".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferResponse {
    Accepted(TransferId),
    Failed { error: String },
    /// The canister is still indexing the source chain up to this block.
    Fetching { block_height: u64 },
}

/// State of the sweep out of a forwarding address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardingStatus {
    CheckingBalance,
    LowBalance { balance: u128, min_amount: u128 },
    Forwarding,
    Forwarded(EvmTx),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingResponse {
    /// Latest transfer that was created from this forwarding address.
    pub done: Option<TransferId>,
    pub status: Option<ForwardingStatus>,
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
