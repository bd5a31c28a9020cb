// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use thiserror::Error;

/// Errors from EVM contract calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvmError {
    /// The wallet or node refused the call outright (signature declined,
    /// gas estimation reverted).
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("rpc failed: {0}")]
    Transport(String),
}

impl EvmError {
    pub fn is_transient(&self) -> bool {
        matches!(self, EvmError::Transport(_))
    }
}

/// A state-changing call on one of the bridge's EVM contracts.
///
/// Lock and burn come in one- and two-word variants; which one applies is
/// decided by whether the encoded account has a second word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    Approve { token: String, spender: String, amount: u128 },
    Lock1 { locker: String, amount: u128, data1: [u8; 32] },
    Lock2 { locker: String, amount: u128, data1: [u8; 32], data2: [u8; 32] },
    Burn1 { token: String, amount: u128, data1: [u8; 32] },
    Burn2 { token: String, amount: u128, data1: [u8; 32], data2: [u8; 32] },
}

impl ContractCall {
    pub fn lock(locker: String, amount: u128, data1: [u8; 32], data2: Option<[u8; 32]>) -> Self {
        match data2 {
            Some(data2) => ContractCall::Lock2 { locker, amount, data1, data2 },
            None => ContractCall::Lock1 { locker, amount, data1 },
        }
    }

    pub fn burn(token: String, amount: u128, data1: [u8; 32], data2: Option<[u8; 32]>) -> Self {
        match data2 {
            Some(data2) => ContractCall::Burn2 { token, amount, data1, data2 },
            None => ContractCall::Burn1 { token, amount, data1 },
        }
    }

    /// Solidity function name of the entry point.
    pub fn entry_point(&self) -> &'static str {
        match self {
            ContractCall::Approve { .. } => "approve",
            ContractCall::Lock1 { .. } => "lock1",
            ContractCall::Lock2 { .. } => "lock2",
            ContractCall::Burn1 { .. } => "burn1",
            ContractCall::Burn2 { .. } => "burn2",
        }
    }

    /// Address of the contract being called.
    pub fn contract(&self) -> &str {
        match self {
            ContractCall::Approve { token, .. }
            | ContractCall::Burn1 { token, .. }
            | ContractCall::Burn2 { token, .. } => token,
            ContractCall::Lock1 { locker, .. } | ContractCall::Lock2 { locker, .. } => locker,
        }
    }
}

/// Mined transaction outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: String,
    /// On-chain status 1.
    pub success: bool,
}

/// Adapter for a signer connected to an EVM chain
///
/// Sending and waiting are separate calls so the hash of a broadcast
/// transaction survives a failed wait.
#[async_trait]
pub trait EvmAdapter: Clone + Send + Sync + 'static {
    /// Address of the signing account
    async fn address(&self) -> Result<String, EvmError>;

    /// Sign and broadcast the call, returning the transaction hash
    async fn send(&self, call: ContractCall) -> Result<String, EvmError>;

    /// Wait until the transaction is mined
    async fn wait_for_receipt(&self, hash: &str) -> Result<TxReceipt, EvmError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::*;
    use crate::script::Script;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded signer call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum EvmCall {
        Send(ContractCall),
        WaitForReceipt(String),
    }

    struct FakeEvmState {
        address: String,
        sends: Script<Result<String, EvmError>>,
        receipts: Script<Result<TxReceipt, EvmError>>,
        calls: Vec<EvmCall>,
        sent: usize,
    }

    /// Fake EVM signer.
    ///
    /// Unscripted sends succeed with a hash derived from the send's
    /// position; unscripted waits report that hash as mined.
    #[derive(Clone)]
    pub struct FakeEvmAdapter {
        inner: Arc<Mutex<FakeEvmState>>,
    }

    impl FakeEvmAdapter {
        pub fn new(address: impl Into<String>) -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeEvmState {
                    address: address.into(),
                    sends: Script::default(),
                    receipts: Script::default(),
                    calls: Vec::new(),
                    sent: 0,
                })),
            }
        }

        pub fn push_send(&self, reply: Result<String, EvmError>) -> &Self {
            self.inner.lock().sends.push(reply);
            self
        }

        pub fn push_receipt(&self, reply: Result<TxReceipt, EvmError>) -> &Self {
            self.inner.lock().receipts.push(reply);
            self
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<EvmCall> {
            self.inner.lock().calls.clone()
        }

        /// Entry points of the broadcast calls, in order.
        pub fn entry_points(&self) -> Vec<&'static str> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter_map(|c| match c {
                    EvmCall::Send(call) => Some(call.entry_point()),
                    EvmCall::WaitForReceipt(_) => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl EvmAdapter for FakeEvmAdapter {
        async fn address(&self) -> Result<String, EvmError> {
            Ok(self.inner.lock().address.clone())
        }

        async fn send(&self, call: ContractCall) -> Result<String, EvmError> {
            let mut state = self.inner.lock();
            state.calls.push(EvmCall::Send(call));
            state.sent += 1;
            let n = state.sent;
            state.sends.next().unwrap_or_else(|| Ok(format!("0x{n:064x}")))
        }

        async fn wait_for_receipt(&self, hash: &str) -> Result<TxReceipt, EvmError> {
            let mut state = self.inner.lock();
            state.calls.push(EvmCall::WaitForReceipt(hash.to_string()));
            state
                .receipts
                .next()
                .unwrap_or_else(|| Ok(TxReceipt { hash: hash.to_string(), success: true }))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{EvmCall, FakeEvmAdapter};

#[cfg(test)]
#[path = "evm_tests.rs"]
mod tests;
