// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer history of an ICP account.

use crate::error::BuildError;
use onesec_adapters::{SettlementAdapter, TransfersQuery};
use onesec_core::{IcrcAccount, Transfer};

/// One page of `account`'s transfers, most recent first.
///
/// `count` defaults to [`TransfersQuery::DEFAULT_COUNT`].
pub async fn get_transfers<S: SettlementAdapter>(
    settlement: &S,
    account: IcrcAccount,
    count: Option<u64>,
    skip: u64,
) -> Result<Vec<Transfer>, BuildError> {
    let query = TransfersQuery {
        account,
        count: count.unwrap_or(TransfersQuery::DEFAULT_COUNT),
        skip,
    };
    Ok(settlement.get_transfers(query).await?)
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
