// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use onesec_core::{Config, ConfigError, Deployment};
use std::path::PathBuf;
use std::time::Duration;

/// Target deployment from `ONESEC_DEPLOYMENT` (default mainnet).
pub fn deployment() -> Deployment {
    let Ok(value) = std::env::var("ONESEC_DEPLOYMENT") else {
        return Deployment::default();
    };
    value.parse().unwrap_or_else(|e: String| {
        tracing::warn!(error = %e, "ignoring ONESEC_DEPLOYMENT");
        Deployment::default()
    })
}

/// Path of a TOML config replacing the built-in tables
pub fn config_path() -> Option<PathBuf> {
    std::env::var("ONESEC_CONFIG").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Poll delay override, applied to every deployment
pub fn poll_delay() -> Option<Duration> {
    std::env::var("ONESEC_POLL_DELAY_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Built-in config, or the file named by `ONESEC_CONFIG`, with the poll
/// delay override applied.
pub fn config() -> Result<Config, ConfigError> {
    let mut config = match config_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Config::load(&path)?
        }
        None => Config::default(),
    };
    if let Some(delay) = poll_delay() {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        config.icp.poll_delay_ms = Deployment::ALL.into_iter().map(|d| (d, ms)).collect();
    }
    Ok(config)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
