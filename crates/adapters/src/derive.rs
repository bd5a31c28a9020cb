// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forwarding-address derivation.
//!
//! The derivation itself is a compiled module owned by the bridge
//! operators; only its contract is modelled here:
//! `(key id, principal bytes, 32-byte subaccount) -> EVM address`.

use onesec_core::Subaccount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    #[error("address derivation failed: {0}")]
    Failed(String),
}

/// Deterministic forwarding-address derivation
pub trait AddressDeriver: Clone + Send + Sync + 'static {
    fn derive_address(
        &self,
        key_id: u8,
        principal: &[u8],
        subaccount: &Subaccount,
    ) -> Result<String, DeriveError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::*;

    /// Fake deriver: a stable, input-dependent 20-byte address.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FakeDeriver;

    impl AddressDeriver for FakeDeriver {
        fn derive_address(
            &self,
            key_id: u8,
            principal: &[u8],
            subaccount: &Subaccount,
        ) -> Result<String, DeriveError> {
            // FNV-1a over the inputs, stretched to 20 bytes
            let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
            for byte in std::iter::once(&key_id).chain(principal).chain(subaccount.iter()) {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
            let bytes: Vec<u8> =
                (0..20u64).map(|i| (hash.rotate_left((i * 7) as u32) ^ i) as u8).collect();
            Ok(format!("0x{}", hex::encode(bytes)))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDeriver;

#[cfg(test)]
#[path = "derive_tests.rs"]
mod tests;
