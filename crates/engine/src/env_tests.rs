// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use onesec_core::EvmChain;
use serial_test::serial;

const LOCAL_ONLY: &str = r#"
    [tokens.USDC]
    mode = "locker"
    decimals = 6
    ledger_fee = 10000

    [tokens.USDC.erc20]
    default = "0x01"

    [tokens.USDC.locker]
    default = "0x02"

    [tokens.USDC.ledger]
    default = "53nhb-haaaa-aaaar-qbn5q-cai"

    [icp]
    hosts = { Local = "http://localhost:4943" }
    onesec = { Local = "5okwm-giaaa-aaaar-qbn6a-cai" }
    poll_delay_ms = { Local = 500 }

    [evm.Base]
    confirm_blocks = 2
    block_time_ms = { Local = 5 }
"#;

fn clear() {
    for var in ["ONESEC_DEPLOYMENT", "ONESEC_CONFIG", "ONESEC_POLL_DELAY_MS"] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_without_environment() {
    clear();
    assert_eq!(deployment(), Deployment::Mainnet);
    assert_eq!(config_path(), None);
    assert_eq!(poll_delay(), None);
    assert_eq!(config().unwrap(), Config::default());
}

#[test]
#[serial]
fn deployment_from_env() {
    clear();
    for (value, expected) in [
        ("testnet", Deployment::Testnet),
        ("LOCAL", Deployment::Local),
        ("devnet", Deployment::Mainnet),
    ] {
        std::env::set_var("ONESEC_DEPLOYMENT", value);
        assert_eq!(deployment(), expected, "{value}");
    }
    clear();
}

#[test]
#[serial]
fn poll_delay_override() {
    clear();
    std::env::set_var("ONESEC_POLL_DELAY_MS", "250");
    let config = config().unwrap();
    for deployment in Deployment::ALL {
        assert_eq!(config.poll_delay(deployment), Duration::from_millis(250), "{deployment}");
    }

    std::env::set_var("ONESEC_POLL_DELAY_MS", "soon");
    assert_eq!(poll_delay(), None);
    clear();
}

#[test]
#[serial]
fn config_file_replaces_builtin_tables() {
    clear();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("onesec.toml");
    std::fs::write(&path, LOCAL_ONLY).unwrap();
    std::env::set_var("ONESEC_CONFIG", &path);
    std::env::set_var("ONESEC_POLL_DELAY_MS", "10");

    let config = config().unwrap();
    assert_eq!(config.tokens.len(), 1);
    assert_eq!(config.poll_delay(Deployment::Local), Duration::from_millis(10));
    assert_eq!(config.confirmations(EvmChain::Base, Deployment::Local).unwrap().block_count, 2);
    clear();
}

#[test]
#[serial]
fn missing_config_file_is_an_error() {
    clear();
    std::env::set_var("ONESEC_CONFIG", "/nonexistent/onesec.toml");
    assert!(matches!(config(), Err(ConfigError::Io(_))));
    clear();
}
