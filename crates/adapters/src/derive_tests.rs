// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_derivation_is_deterministic() {
    let a = FakeDeriver.derive_address(0, &[1, 2, 3], &[0; 32]).unwrap();
    let b = FakeDeriver.derive_address(0, &[1, 2, 3], &[0; 32]).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 42);
    assert!(a.starts_with("0x"));
}

#[yare::parameterized(
    key_id = { 1, vec![1, 2, 3], [0; 32] },
    principal = { 0, vec![1, 2, 4], [0; 32] },
    subaccount = { 0, vec![1, 2, 3], [1; 32] },
)]
fn fake_derivation_depends_on_every_input(key_id: u8, principal: Vec<u8>, subaccount: [u8; 32]) {
    let base = FakeDeriver.derive_address(0, &[1, 2, 3], &[0; 32]).unwrap();
    let other = FakeDeriver.derive_address(key_id, &principal, &subaccount).unwrap();
    assert_ne!(base, other);
}
