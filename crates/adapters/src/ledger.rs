// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use candid::Principal;
use onesec_core::Subaccount;
use thiserror::Error;

/// Errors from ICRC ledger calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger returned an `Err` variant (insufficient funds, bad fee, ...).
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("call failed: {0}")]
    Transport(String),
}

impl LedgerError {
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::Transport(_))
    }
}

/// `icrc2_approve` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveRequest {
    pub ledger: Principal,
    pub spender: Principal,
    pub amount: u128,
    pub from_subaccount: Option<Subaccount>,
}

/// Adapter for ICRC-2 ledgers, called as the agent's identity
#[async_trait]
pub trait LedgerAdapter: Clone + Send + Sync + 'static {
    /// Principal of the identity the calls are made with
    async fn principal(&self) -> Result<Principal, LedgerError>;

    /// Approve `spender`; returns the ledger block index
    async fn icrc2_approve(&self, request: ApproveRequest) -> Result<u64, LedgerError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::*;
    use crate::script::Script;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded ledger call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LedgerCall {
        Approve(ApproveRequest),
    }

    struct FakeLedgerState {
        principal: Principal,
        approvals: Script<Result<u64, LedgerError>>,
        calls: Vec<LedgerCall>,
    }

    /// Fake ledger; approvals succeed with increasing block indexes unless scripted
    #[derive(Clone)]
    pub struct FakeLedgerAdapter {
        inner: Arc<Mutex<FakeLedgerState>>,
    }

    impl FakeLedgerAdapter {
        pub fn new(principal: Principal) -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeLedgerState {
                    principal,
                    approvals: Script::default(),
                    calls: Vec::new(),
                })),
            }
        }

        pub fn push_approval(&self, reply: Result<u64, LedgerError>) -> &Self {
            self.inner.lock().approvals.push(reply);
            self
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<LedgerCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl LedgerAdapter for FakeLedgerAdapter {
        async fn principal(&self) -> Result<Principal, LedgerError> {
            Ok(self.inner.lock().principal)
        }

        async fn icrc2_approve(&self, request: ApproveRequest) -> Result<u64, LedgerError> {
            let mut state = self.inner.lock();
            state.calls.push(LedgerCall::Approve(request));
            let n = state.calls.len() as u64;
            state.approvals.next().unwrap_or(Ok(100 + n))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLedgerAdapter, LedgerCall};
