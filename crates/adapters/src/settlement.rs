// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use onesec_core::{
    EvmAccount, EvmChain, EvmTx, ForwardingResponse, IcrcAccount, Token, Transfer, TransferFee,
    TransferId, TransferResponse,
};
use thiserror::Error;

/// Errors from settlement canister calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// The canister answered with an explicit error.
    #[error("rejected: {0}")]
    Rejected(String),
    /// The call never got an answer (network, agent, replica).
    #[error("call failed: {0}")]
    Transport(String),
}

impl SettlementError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SettlementError::Transport(_))
    }
}

/// Proof of an EVM-side lock or burn, submitted for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmToIcpRequest {
    pub token: Token,
    pub evm_chain: EvmChain,
    pub evm_account: EvmAccount,
    pub evm_tx: EvmTx,
    pub icp_account: IcrcAccount,
    pub evm_amount: u128,
    pub icp_amount: Option<u128>,
}

/// Request to pull approved tokens from the ledger and pay out on EVM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcpToEvmRequest {
    pub token: Token,
    pub evm_chain: EvmChain,
    pub evm_account: EvmAccount,
    pub icp_account: IcrcAccount,
    pub icp_amount: u128,
    pub evm_amount: Option<u128>,
}

/// Identifies one forwarding address: tokens of `token` sent to `address`
/// on `chain` are swept to `receiver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingRequest {
    pub token: Token,
    pub chain: EvmChain,
    pub address: String,
    pub receiver: IcrcAccount,
}

/// Page of transfer history for one account, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransfersQuery {
    pub account: IcrcAccount,
    pub count: u64,
    pub skip: u64,
}

impl TransfersQuery {
    pub const DEFAULT_COUNT: u64 = 10;

    pub fn new(account: IcrcAccount) -> Self {
        Self { account, count: Self::DEFAULT_COUNT, skip: 0 }
    }
}

/// Adapter for the OneSec settlement canister
#[async_trait]
pub trait SettlementAdapter: Clone + Send + Sync + 'static {
    async fn get_transfer_fees(&self) -> Result<Vec<TransferFee>, SettlementError>;

    async fn transfer_evm_to_icp(
        &self,
        request: EvmToIcpRequest,
    ) -> Result<TransferResponse, SettlementError>;

    async fn transfer_icp_to_evm(
        &self,
        request: IcpToEvmRequest,
    ) -> Result<TransferResponse, SettlementError>;

    async fn get_transfer(&self, id: TransferId) -> Result<Transfer, SettlementError>;

    async fn get_transfers(&self, query: TransfersQuery) -> Result<Vec<Transfer>, SettlementError>;

    async fn validate_forwarding_address(
        &self,
        receiver: &IcrcAccount,
        address: &str,
    ) -> Result<(), SettlementError>;

    async fn get_forwarding_status(
        &self,
        request: &ForwardingRequest,
    ) -> Result<ForwardingResponse, SettlementError>;

    async fn forward_evm_to_icp(
        &self,
        request: &ForwardingRequest,
    ) -> Result<ForwardingResponse, SettlementError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::*;
    use crate::script::Script;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Recorded settlement call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SettlementCall {
        GetTransferFees,
        TransferEvmToIcp(EvmToIcpRequest),
        TransferIcpToEvm(IcpToEvmRequest),
        GetTransfer(TransferId),
        GetTransfers(TransfersQuery),
        ValidateForwardingAddress { receiver: IcrcAccount, address: String },
        GetForwardingStatus(ForwardingRequest),
        ForwardEvmToIcp(ForwardingRequest),
    }

    type Reply<T> = Result<T, SettlementError>;

    #[derive(Default)]
    struct FakeSettlementState {
        calls: Vec<SettlementCall>,
        fees: Script<Reply<Vec<TransferFee>>>,
        evm_to_icp: Script<Reply<TransferResponse>>,
        icp_to_evm: Script<Reply<TransferResponse>>,
        transfers: HashMap<TransferId, Script<Reply<Transfer>>>,
        history: Script<Reply<Vec<Transfer>>>,
        address_validation: Script<Reply<()>>,
        forwarding_status: Script<Reply<ForwardingResponse>>,
        forward: Script<Reply<ForwardingResponse>>,
    }

    /// Fake settlement canister with scripted replies.
    ///
    /// Each endpoint replays its queue in order and then keeps repeating the
    /// last reply. Endpoints with nothing scripted answer with a transport
    /// error, except address validation which accepts.
    #[derive(Clone, Default)]
    pub struct FakeSettlementAdapter {
        inner: Arc<Mutex<FakeSettlementState>>,
    }

    fn unscripted<T>(endpoint: &str) -> Reply<T> {
        Err(SettlementError::Transport(format!("no scripted reply for {endpoint}")))
    }

    impl FakeSettlementAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_fees(&self, reply: Reply<Vec<TransferFee>>) -> &Self {
            self.inner.lock().fees.push(reply);
            self
        }

        pub fn push_evm_to_icp(&self, reply: Reply<TransferResponse>) -> &Self {
            self.inner.lock().evm_to_icp.push(reply);
            self
        }

        pub fn push_icp_to_evm(&self, reply: Reply<TransferResponse>) -> &Self {
            self.inner.lock().icp_to_evm.push(reply);
            self
        }

        pub fn push_transfer(&self, id: TransferId, reply: Reply<Transfer>) -> &Self {
            self.inner.lock().transfers.entry(id).or_default().push(reply);
            self
        }

        pub fn push_history(&self, reply: Reply<Vec<Transfer>>) -> &Self {
            self.inner.lock().history.push(reply);
            self
        }

        pub fn push_address_validation(&self, reply: Reply<()>) -> &Self {
            self.inner.lock().address_validation.push(reply);
            self
        }

        pub fn push_forwarding_status(&self, reply: Reply<ForwardingResponse>) -> &Self {
            self.inner.lock().forwarding_status.push(reply);
            self
        }

        pub fn push_forward(&self, reply: Reply<ForwardingResponse>) -> &Self {
            self.inner.lock().forward.push(reply);
            self
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<SettlementCall> {
            self.inner.lock().calls.clone()
        }

        /// Number of recorded calls matching `pred`
        pub fn count(&self, pred: impl Fn(&SettlementCall) -> bool) -> usize {
            self.inner.lock().calls.iter().filter(|c| pred(c)).count()
        }
    }

    #[async_trait]
    impl SettlementAdapter for FakeSettlementAdapter {
        async fn get_transfer_fees(&self) -> Result<Vec<TransferFee>, SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::GetTransferFees);
            state.fees.next().unwrap_or_else(|| unscripted("get_transfer_fees"))
        }

        async fn transfer_evm_to_icp(
            &self,
            request: EvmToIcpRequest,
        ) -> Result<TransferResponse, SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::TransferEvmToIcp(request));
            state.evm_to_icp.next().unwrap_or_else(|| unscripted("transfer_evm_to_icp"))
        }

        async fn transfer_icp_to_evm(
            &self,
            request: IcpToEvmRequest,
        ) -> Result<TransferResponse, SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::TransferIcpToEvm(request));
            state.icp_to_evm.next().unwrap_or_else(|| unscripted("transfer_icp_to_evm"))
        }

        async fn get_transfer(&self, id: TransferId) -> Result<Transfer, SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::GetTransfer(id));
            match state.transfers.get_mut(&id).and_then(Script::next) {
                Some(reply) => reply,
                None => Err(SettlementError::Rejected(format!("transfer {id} not found"))),
            }
        }

        async fn get_transfers(
            &self,
            query: TransfersQuery,
        ) -> Result<Vec<Transfer>, SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::GetTransfers(query));
            state.history.next().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn validate_forwarding_address(
            &self,
            receiver: &IcrcAccount,
            address: &str,
        ) -> Result<(), SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::ValidateForwardingAddress {
                receiver: *receiver,
                address: address.to_string(),
            });
            state.address_validation.next().unwrap_or(Ok(()))
        }

        async fn get_forwarding_status(
            &self,
            request: &ForwardingRequest,
        ) -> Result<ForwardingResponse, SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::GetForwardingStatus(request.clone()));
            state.forwarding_status.next().unwrap_or_else(|| unscripted("get_forwarding_status"))
        }

        async fn forward_evm_to_icp(
            &self,
            request: &ForwardingRequest,
        ) -> Result<ForwardingResponse, SettlementError> {
            let mut state = self.inner.lock();
            state.calls.push(SettlementCall::ForwardEvmToIcp(request.clone()));
            state.forward.next().unwrap_or_else(|| unscripted("forward_evm_to_icp"))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSettlementAdapter, SettlementCall};

#[cfg(test)]
#[path = "settlement_tests.rs"]
mod tests;
