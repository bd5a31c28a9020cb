// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::tx::{EvmTx, IcpTx, Tx};

fn owner() -> Principal {
    Principal::from_slice(&[1, 2, 3, 4, 5])
}

#[test]
fn owner_only_account_encodes_into_one_word() {
    let encoded = encode_icrc_account(&IcrcAccount::new(owner())).unwrap();

    let mut expected = [0u8; 32];
    expected[1] = 5;
    expected[2..7].copy_from_slice(&[1, 2, 3, 4, 5]);
    assert_eq!(encoded.data1, expected);
    assert_eq!(encoded.data2, None);
}

#[test]
fn subaccount_becomes_second_word() {
    let sub = [7u8; 32];
    let encoded = encode_icrc_account(&IcrcAccount::with_subaccount(owner(), Some(sub))).unwrap();
    assert_eq!(encoded.data1[0], 0);
    assert_eq!(encoded.data2, Some(sub));
}

#[test]
fn explicit_zero_subaccount_still_uses_two_words() {
    let encoded =
        encode_icrc_account(&IcrcAccount::with_subaccount(owner(), Some([0; 32]))).unwrap();
    assert_eq!(encoded.data2, Some([0; 32]));
}

#[test]
fn longest_principal_fills_word_one() {
    let bytes = [9u8; MAX_PRINCIPAL_LEN];
    let encoded = encode_icrc_account(&IcrcAccount::new(Principal::from_slice(&bytes))).unwrap();
    assert_eq!(encoded.data1[1], 29);
    assert_eq!(&encoded.data1[2..31], &bytes);
    assert_eq!(encoded.data1[31], 0);
}

#[yare::parameterized(
    short = { 31 },
    long = { 33 },
    empty = { 0 },
)]
fn subaccount_length_is_checked(len: usize) {
    let bytes = vec![1u8; len];
    assert_eq!(subaccount_from_slice(&bytes), Err(AccountError::SubaccountLength(len)));
}

#[test]
fn format_hides_zero_subaccount() {
    let plain = IcrcAccount::with_subaccount(owner(), Some([0; 32]));
    assert_eq!(format_icp_account(&plain), owner().to_text());

    let mut sub = [0u8; 32];
    sub[31] = 0xab;
    let with_sub = IcrcAccount::with_subaccount(owner(), Some(sub));
    assert_eq!(
        format_icp_account(&with_sub),
        format!("{} / {}00ab", owner(), "00".repeat(30))
    );
}

#[test]
fn tx_display_matches_chain() {
    let evm = Tx::from(EvmTx::new("0xdead"));
    assert_eq!(evm.to_string(), "0xdead");

    let icp = Tx::from(IcpTx { block_index: 42, ledger: owner() });
    assert_eq!(icp.to_string(), format!("{} / 42", owner()));
}

#[test]
fn account_accessors() {
    let evm = Account::from(EvmAccount::new("0xabc"));
    assert_eq!(evm.as_evm().map(|a| a.address.as_str()), Some("0xabc"));
    assert!(evm.as_icrc().is_none());

    let icp = Account::from(IcrcAccount::new(owner()));
    assert!(icp.as_evm().is_none());
    assert_eq!(icp.as_icrc().map(|a| a.owner), Some(owner()));
}
