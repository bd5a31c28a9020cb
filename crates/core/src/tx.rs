// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction references and transfer handles.

use candid::Principal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvmTx {
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_index: Option<u64>,
}

impl EvmTx {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into(), log_index: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IcpTx {
    pub block_index: u64,
    pub ledger: Principal,
}

/// Proof that something happened on one of the two chains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tx {
    Evm(EvmTx),
    Icp(IcpTx),
}

impl From<EvmTx> for Tx {
    fn from(tx: EvmTx) -> Self {
        Tx::Evm(tx)
    }
}

impl From<IcpTx> for Tx {
    fn from(tx: IcpTx) -> Self {
        Tx::Icp(tx)
    }
}

impl std::fmt::Display for Tx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tx::Evm(tx) => f.write_str(&tx.hash),
            Tx::Icp(tx) => write!(f, "{} / {}", tx.ledger, tx.block_index),
        }
    }
}

/// Handle the settlement canister assigns to an accepted transfer.
///
/// Ids grow monotonically on the remote side, which the forwarding steps
/// rely on to spot a transfer newer than the last one they saw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TransferId(pub u64);

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TransferId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
