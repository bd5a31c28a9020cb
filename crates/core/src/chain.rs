// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chains, tokens, and deployment targets.

use serde::{Deserialize, Serialize};

/// An EVM chain the bridge has contracts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvmChain {
    Base,
    Arbitrum,
    Ethereum,
}

crate::simple_display! {
    EvmChain {
        Base => "Base",
        Arbitrum => "Arbitrum",
        Ethereum => "Ethereum",
    }
}

impl EvmChain {
    pub const ALL: [EvmChain; 3] = [EvmChain::Base, EvmChain::Arbitrum, EvmChain::Ethereum];
}

/// Either side of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chain {
    #[serde(rename = "ICP")]
    Icp,
    Base,
    Arbitrum,
    Ethereum,
}

crate::simple_display! {
    Chain {
        Icp => "ICP",
        Base => "Base",
        Arbitrum => "Arbitrum",
        Ethereum => "Ethereum",
    }
}

impl Chain {
    pub fn is_evm(&self) -> bool {
        self.as_evm().is_some()
    }

    pub fn as_evm(&self) -> Option<EvmChain> {
        match self {
            Chain::Icp => None,
            Chain::Base => Some(EvmChain::Base),
            Chain::Arbitrum => Some(EvmChain::Arbitrum),
            Chain::Ethereum => Some(EvmChain::Ethereum),
        }
    }
}

impl From<EvmChain> for Chain {
    fn from(chain: EvmChain) -> Self {
        match chain {
            EvmChain::Base => Chain::Base,
            EvmChain::Arbitrum => Chain::Arbitrum,
            EvmChain::Ethereum => Chain::Ethereum,
        }
    }
}

/// Tokens the bridge knows how to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Token {
    #[serde(rename = "ICP")]
    Icp,
    #[serde(rename = "USDC")]
    Usdc,
    #[serde(rename = "USDT")]
    Usdt,
    #[serde(rename = "cbBTC")]
    CbBtc,
    #[serde(rename = "ckBTC")]
    CkBtc,
    #[serde(rename = "GLDT")]
    Gldt,
    #[serde(rename = "BOB")]
    Bob,
}

crate::simple_display! {
    Token {
        Icp => "ICP",
        Usdc => "USDC",
        Usdt => "USDT",
        CbBtc => "cbBTC",
        CkBtc => "ckBTC",
        Gldt => "GLDT",
        Bob => "BOB",
    }
}

impl Token {
    pub const ALL: [Token; 7] =
        [Token::Icp, Token::Usdc, Token::Usdt, Token::CbBtc, Token::CkBtc, Token::Gldt, Token::Bob];
}

/// Which network the bridge canister and contracts live on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Deployment {
    #[default]
    Mainnet,
    Testnet,
    Local,
}

impl Deployment {
    pub const ALL: [Deployment; 3] = [Deployment::Mainnet, Deployment::Testnet, Deployment::Local];
}

crate::simple_display! {
    Deployment {
        Mainnet => "Mainnet",
        Testnet => "Testnet",
        Local => "Local",
    }
}

impl std::str::FromStr for Deployment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Deployment::Mainnet),
            "testnet" => Ok(Deployment::Testnet),
            "local" => Ok(Deployment::Local),
            other => Err(format!("unknown deployment: {other}")),
        }
    }
}

impl Deployment {
    /// Threshold-key id used when deriving forwarding addresses.
    pub fn forwarding_key_id(&self) -> u8 {
        match self {
            Deployment::Mainnet => 0,
            Deployment::Testnet => 1,
            Deployment::Local => 2,
        }
    }
}

/// How a token crosses to the EVM side.
///
/// Locker tokens are escrowed in a locker contract and need an ERC-20
/// allowance first; minter tokens are wrapped and get burned directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Locker,
    Minter,
}

crate::simple_display! {
    OperatingMode {
        Locker => "locker",
        Minter => "minter",
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
