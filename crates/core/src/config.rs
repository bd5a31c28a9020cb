// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridge configuration: token contracts, canister ids, and chain timing.
//!
//! [`Config::default`] carries the built-in tables for all three
//! deployments. A TOML file with the same shape can replace them.

use crate::chain::{Deployment, EvmChain, OperatingMode, Token};
use candid::Principal;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("token {0} not found in config")]
    UnknownToken(Token),
    #[error("EVM chain {0} not found in config")]
    UnknownChain(EvmChain),
    #[error("no {what} configured for {deployment}")]
    MissingDeployment { what: &'static str, deployment: Deployment },
    #[error("no {what} address for {token} on {deployment}")]
    MissingAddress { what: &'static str, token: Token, deployment: Deployment },
    #[error("invalid principal {text}: {reason}")]
    InvalidPrincipal { text: String, reason: String },
}

/// Address lookup table: `deployments[d].chains[c]`, then
/// `deployments[d].default`, then `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub deployments: IndexMap<Deployment, DeploymentAddresses>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentAddresses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub chains: IndexMap<EvmChain, String>,
}

impl AddressTable {
    pub fn lookup(&self, deployment: Deployment, chain: Option<EvmChain>) -> Option<&str> {
        let by_deployment = self.deployments.get(&deployment);
        chain
            .and_then(|c| by_deployment.and_then(|d| d.chains.get(&c)))
            .or_else(|| by_deployment.and_then(|d| d.default.as_ref()))
            .or(self.default.as_ref())
            .map(String::as_str)
    }

    fn everywhere(address: &str) -> Self {
        Self { default: Some(address.to_string()), deployments: IndexMap::new() }
    }

    fn per_deployment(entries: &[(Deployment, &str)]) -> Self {
        let deployments = entries
            .iter()
            .map(|(d, a)| {
                (*d, DeploymentAddresses { default: Some(a.to_string()), chains: IndexMap::new() })
            })
            .collect();
        Self { default: None, deployments }
    }

    fn per_chain(entries: &[(Deployment, EvmChain, &str)]) -> Self {
        let mut table = Self::default();
        for (d, c, a) in entries {
            table.deployments.entry(*d).or_default().chains.insert(*c, a.to_string());
        }
        table
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub mode: OperatingMode,
    pub decimals: u8,
    /// ICRC ledger transfer fee, in units.
    pub ledger_fee: u64,
    #[serde(default)]
    pub erc20: AddressTable,
    #[serde(default)]
    pub locker: AddressTable,
    #[serde(default)]
    pub ledger: AddressTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcpConfig {
    pub hosts: IndexMap<Deployment, String>,
    /// Settlement canister id per deployment.
    pub onesec: IndexMap<Deployment, String>,
    /// Status polling interval per deployment. Missing entries use
    /// [`DEFAULT_POLL_DELAY_MS`].
    #[serde(default)]
    pub poll_delay_ms: IndexMap<Deployment, u64>,
}

pub const DEFAULT_POLL_DELAY_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmConfig {
    pub confirm_blocks: u64,
    pub block_time_ms: IndexMap<Deployment, u64>,
    /// Block explorer base URL, used for transaction links.
    #[serde(default)]
    pub explorer: IndexMap<Deployment, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub tokens: IndexMap<Token, TokenConfig>,
    pub icp: IcpConfig,
    pub evm: IndexMap<EvmChain, EvmConfig>,
}

/// Block count and block time for the confirm-blocks step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmations {
    pub block_count: u64,
    pub block_time: Duration,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn token(&self, token: Token) -> Result<&TokenConfig, ConfigError> {
        self.tokens.get(&token).ok_or(ConfigError::UnknownToken(token))
    }

    pub fn decimals(&self, token: Token) -> Result<u8, ConfigError> {
        Ok(self.token(token)?.decimals)
    }

    pub fn mode(&self, token: Token) -> Result<OperatingMode, ConfigError> {
        Ok(self.token(token)?.mode)
    }

    pub fn erc20_address(
        &self,
        token: Token,
        deployment: Deployment,
        chain: EvmChain,
    ) -> Result<String, ConfigError> {
        self.token(token)?
            .erc20
            .lookup(deployment, Some(chain))
            .map(str::to_string)
            .ok_or(ConfigError::MissingAddress { what: "ERC-20", token, deployment })
    }

    /// `None` for minter-mode tokens, which have no locker.
    pub fn locker_address(
        &self,
        token: Token,
        deployment: Deployment,
        chain: EvmChain,
    ) -> Result<Option<String>, ConfigError> {
        let config = self.token(token)?;
        if config.mode != OperatingMode::Locker {
            return Ok(None);
        }
        config
            .locker
            .lookup(deployment, Some(chain))
            .map(|a| Some(a.to_string()))
            .ok_or(ConfigError::MissingAddress { what: "locker", token, deployment })
    }

    pub fn ledger_canister(
        &self,
        token: Token,
        deployment: Deployment,
    ) -> Result<Principal, ConfigError> {
        let text = self
            .token(token)?
            .ledger
            .lookup(deployment, None)
            .ok_or(ConfigError::MissingAddress { what: "ledger", token, deployment })?;
        parse_principal(text)
    }

    pub fn onesec_canister(&self, deployment: Deployment) -> Result<Principal, ConfigError> {
        let text = self
            .icp
            .onesec
            .get(&deployment)
            .ok_or(ConfigError::MissingDeployment { what: "settlement canister", deployment })?;
        parse_principal(text)
    }

    pub fn host(&self, deployment: Deployment) -> Result<&str, ConfigError> {
        self.icp
            .hosts
            .get(&deployment)
            .map(String::as_str)
            .ok_or(ConfigError::MissingDeployment { what: "ICP host", deployment })
    }

    pub fn poll_delay(&self, deployment: Deployment) -> Duration {
        let ms = self.icp.poll_delay_ms.get(&deployment).copied().unwrap_or(DEFAULT_POLL_DELAY_MS);
        Duration::from_millis(ms)
    }

    pub fn confirmations(
        &self,
        chain: EvmChain,
        deployment: Deployment,
    ) -> Result<Confirmations, ConfigError> {
        let evm = self.evm.get(&chain).ok_or(ConfigError::UnknownChain(chain))?;
        let block_time_ms = evm
            .block_time_ms
            .get(&deployment)
            .ok_or(ConfigError::MissingDeployment { what: "block time", deployment })?;
        Ok(Confirmations {
            block_count: evm.confirm_blocks,
            block_time: Duration::from_millis(*block_time_ms),
        })
    }

    pub fn explorer(&self, chain: EvmChain, deployment: Deployment) -> Option<&str> {
        self.evm.get(&chain)?.explorer.get(&deployment).map(String::as_str)
    }

    pub fn tx_link(&self, chain: EvmChain, deployment: Deployment, hash: &str) -> Option<String> {
        self.explorer(chain, deployment).map(|base| explorer_tx_link(base, hash))
    }
}

pub fn explorer_tx_link(explorer: &str, hash: &str) -> String {
    format!("{}/tx/{hash}", explorer.trim_end_matches('/'))
}

fn parse_principal(text: &str) -> Result<Principal, ConfigError> {
    Principal::from_text(text)
        .map_err(|e| ConfigError::InvalidPrincipal { text: text.to_string(), reason: e.to_string() })
}

impl Default for Config {
    fn default() -> Self {
        use Deployment::{Local, Mainnet, Testnet};
        use EvmChain::{Arbitrum, Base, Ethereum};

        let minter = |decimals, ledger_fee, erc20: AddressTable, ledger: &str| TokenConfig {
            mode: OperatingMode::Minter,
            decimals,
            ledger_fee,
            erc20,
            locker: AddressTable::default(),
            ledger: AddressTable::everywhere(ledger),
        };

        let mut tokens = IndexMap::new();
        tokens.insert(
            Token::Icp,
            minter(
                8,
                10_000,
                AddressTable::per_deployment(&[
                    (Mainnet, "0x00f3C42833C3170159af4E92dbb451Fb3F708917"),
                    (Local, "0x00f3C42833C3170159af4E92dbb451Fb3F708917"),
                    (Testnet, "0xa96496d9Ef442a3CF8F3e24B614b87a70ddf74f3"),
                ]),
                "ryjl3-tyaaa-aaaaa-aaaba-cai",
            ),
        );
        tokens.insert(
            Token::Usdc,
            TokenConfig {
                mode: OperatingMode::Locker,
                decimals: 6,
                ledger_fee: 10_000,
                erc20: AddressTable::per_chain(&[
                    (Mainnet, Base, "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
                    (Mainnet, Arbitrum, "0xaf88d065e77c8cC2239327C5EDb3A432268e5831"),
                    (Mainnet, Ethereum, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                ]),
                locker: AddressTable::per_deployment(&[
                    (Mainnet, "0xAe2351B15cFf68b5863c6690dCA58Dce383bf45A"),
                    (Local, "0xAe2351B15cFf68b5863c6690dCA58Dce383bf45A"),
                    (Testnet, "0x38200DD4c3adbE86Be49717ccA8a3fD08466Cba6"),
                ]),
                ledger: AddressTable::per_deployment(&[
                    (Mainnet, "53nhb-haaaa-aaaar-qbn5q-cai"),
                    (Local, "53nhb-haaaa-aaaar-qbn5q-cai"),
                    (Testnet, "7csws-aiaaa-aaaar-qaqpa-cai"),
                ]),
            },
        );
        tokens.insert(
            Token::Usdt,
            TokenConfig {
                mode: OperatingMode::Locker,
                decimals: 6,
                ledger_fee: 10_000,
                erc20: AddressTable::per_chain(&[
                    (Mainnet, Ethereum, "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
                    (Local, Ethereum, "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
                    (Testnet, Ethereum, "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
                ]),
                locker: AddressTable::per_chain(&[
                    (Mainnet, Ethereum, "0xc5AC945a0af0768929301A27D6f2a7770995fAeb"),
                    (Local, Ethereum, "0xc5AC945a0af0768929301A27D6f2a7770995fAeb"),
                    (Testnet, Ethereum, "0x205E3f1001bbE91971D25349ac3aA949D9Be5079"),
                ]),
                ledger: AddressTable::per_deployment(&[
                    (Mainnet, "ij33n-oiaaa-aaaar-qbooa-cai"),
                    (Local, "ij33n-oiaaa-aaaar-qbooa-cai"),
                    (Testnet, "n4dku-tiaaa-aaaar-qboqa-cai"),
                ]),
            },
        );
        tokens.insert(
            Token::CbBtc,
            TokenConfig {
                mode: OperatingMode::Locker,
                decimals: 8,
                ledger_fee: 20,
                erc20: AddressTable::everywhere("0xcbB7C0000aB88B473b1f5aFd9ef808440eed33Bf"),
                locker: AddressTable::per_deployment(&[
                    (Mainnet, "0x7744c6a83E4b43921f27d3c94a742bf9cd24c062"),
                    (Local, "0x7744c6a83E4b43921f27d3c94a742bf9cd24c062"),
                    (Testnet, "0xd543007D8415169756e8a61b2cc079369d4aB6a8"),
                ]),
                ledger: AddressTable::per_deployment(&[
                    (Mainnet, "io25z-dqaaa-aaaar-qbooq-cai"),
                    (Local, "io25z-dqaaa-aaaar-qbooq-cai"),
                    (Testnet, "n3cma-6qaaa-aaaar-qboqq-cai"),
                ]),
            },
        );
        tokens.insert(
            Token::CkBtc,
            minter(
                8,
                10,
                AddressTable::per_deployment(&[
                    (Mainnet, "0x919A41Ea07c26f0001859Bc5dcb8754068718Fb7"),
                    (Local, "0x919A41Ea07c26f0001859Bc5dcb8754068718Fb7"),
                    (Testnet, "0x9D8dE8E7Cd748F760C81199AD3b902798DA7E7bC"),
                ]),
                "mxzaz-hqaaa-aaaar-qaada-cai",
            ),
        );
        tokens.insert(
            Token::Gldt,
            minter(
                8,
                10_000_000,
                AddressTable::per_deployment(&[
                    (Mainnet, "0x86856814e74456893Cfc8946BedcBb472b5fA856"),
                    (Local, "0x86856814e74456893Cfc8946BedcBb472b5fA856"),
                    (Testnet, "0xB5A497b709703eC987B6879f064B02017998De1d"),
                ]),
                "6c7su-kiaaa-aaaar-qaira-cai",
            ),
        );
        tokens.insert(
            Token::Bob,
            minter(
                8,
                1_000_000,
                AddressTable::per_deployment(&[
                    (Mainnet, "0xecc5f868AdD75F4ff9FD00bbBDE12C35BA2C9C89"),
                    (Local, "0xecc5f868AdD75F4ff9FD00bbBDE12C35BA2C9C89"),
                    (Testnet, "0xc6d02fa25bC437E38099476a6856225aE5ac2C75"),
                ]),
                "7pail-xaaaa-aaaas-aabmq-cai",
            ),
        );

        let per_deployment = |mainnet: &str, testnet: &str, local: &str| -> IndexMap<Deployment, String> {
            [(Mainnet, mainnet), (Testnet, testnet), (Local, local)]
                .into_iter()
                .map(|(d, v)| (d, v.to_string()))
                .collect()
        };

        let icp = IcpConfig {
            hosts: per_deployment("https://ic0.app", "https://ic0.app", "http://127.0.1:8080"),
            onesec: per_deployment(
                "5okwm-giaaa-aaaar-qbn6a-cai",
                "zvjow-lyaaa-aaaar-qap7q-cai",
                "5okwm-giaaa-aaaar-qbn6a-cai",
            ),
            poll_delay_ms: [(Mainnet, DEFAULT_POLL_DELAY_MS), (Testnet, DEFAULT_POLL_DELAY_MS), (Local, 500)]
                .into_iter()
                .collect(),
        };

        let chain = |confirm_blocks, block_time_ms: u64, explorer: &str| EvmConfig {
            confirm_blocks,
            block_time_ms: [(Mainnet, block_time_ms), (Testnet, block_time_ms), (Local, 10)]
                .into_iter()
                .collect(),
            explorer: [(Mainnet, explorer.to_string())].into_iter().collect(),
        };

        let mut evm = IndexMap::new();
        evm.insert(Arbitrum, chain(96, 240, "https://arbiscan.io"));
        evm.insert(Base, chain(12, 1_900, "https://basescan.org"));
        evm.insert(Ethereum, chain(4, 12_000, "https://etherscan.io"));

        Self { tokens, icp, evm }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
