// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accounts on both sides of the bridge and their EVM call-data encoding.

use candid::Principal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Subaccount = [u8; 32];

/// Principals are at most 29 bytes, so tag + length + bytes fit one word.
pub const MAX_PRINCIPAL_LEN: usize = 29;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("subaccount must be 32 bytes, got {0}")]
    SubaccountLength(usize),
    #[error("principal is {0} bytes, at most 29 fit an account word")]
    PrincipalTooLong(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IcrcAccount {
    pub owner: Principal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<Subaccount>,
}

impl IcrcAccount {
    pub fn new(owner: Principal) -> Self {
        Self { owner, subaccount: None }
    }

    pub fn with_subaccount(owner: Principal, subaccount: Option<Subaccount>) -> Self {
        Self { owner, subaccount }
    }

    /// The subaccount, zero-filled when absent.
    pub fn effective_subaccount(&self) -> Subaccount {
        self.subaccount.unwrap_or([0; 32])
    }
}

impl std::fmt::Display for IcrcAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_icp_account(self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IcpAccount {
    #[serde(rename = "ICRC")]
    Icrc(IcrcAccount),
    /// Legacy 32-byte account identifier, hex encoded.
    AccountId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvmAccount {
    pub address: String,
}

impl EvmAccount {
    pub fn new(address: impl Into<String>) -> Self {
        Self { address: address.into() }
    }
}

/// An account on either chain, as reported by the settlement canister.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Account {
    Icp(IcpAccount),
    Evm(EvmAccount),
}

impl Account {
    pub fn as_evm(&self) -> Option<&EvmAccount> {
        match self {
            Account::Evm(account) => Some(account),
            Account::Icp(_) => None,
        }
    }

    pub fn as_icrc(&self) -> Option<&IcrcAccount> {
        match self {
            Account::Icp(IcpAccount::Icrc(account)) => Some(account),
            _ => None,
        }
    }
}

impl From<IcrcAccount> for Account {
    fn from(account: IcrcAccount) -> Self {
        Account::Icp(IcpAccount::Icrc(account))
    }
}

impl From<EvmAccount> for Account {
    fn from(account: EvmAccount) -> Self {
        Account::Evm(account)
    }
}

/// An ICRC account packed into one or two 32-byte EVM words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedAccount {
    pub data1: [u8; 32],
    pub data2: Option<[u8; 32]>,
}

/// Word 1 is `[0, len, principal bytes.., zero padding]`; word 2 carries the
/// raw subaccount and is present only when one was supplied.
pub fn encode_icrc_account(account: &IcrcAccount) -> Result<EncodedAccount, AccountError> {
    let bytes = account.owner.as_slice();
    if bytes.len() > MAX_PRINCIPAL_LEN {
        return Err(AccountError::PrincipalTooLong(bytes.len()));
    }
    let mut data1 = [0u8; 32];
    data1[1] = bytes.len() as u8;
    data1[2..2 + bytes.len()].copy_from_slice(bytes);
    Ok(EncodedAccount { data1, data2: account.subaccount })
}

pub fn subaccount_from_slice(bytes: &[u8]) -> Result<Subaccount, AccountError> {
    bytes.try_into().map_err(|_| AccountError::SubaccountLength(bytes.len()))
}

/// Principal text, followed by ` / <hex>` when the subaccount is non-zero.
pub fn format_icp_account(account: &IcrcAccount) -> String {
    match account.subaccount {
        Some(sub) if sub.iter().any(|b| *b != 0) => format!("{} / {}", account.owner, hex::encode(sub)),
        _ => account.owner.to_text(),
    }
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
