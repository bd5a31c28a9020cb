// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! onesec-core: domain types for the OneSec token bridge

pub mod macros;

pub mod account;
pub mod amount;
pub mod backoff;
pub mod chain;
pub mod clock;
pub mod config;
pub mod fee;
pub mod status;
pub mod transfer;
pub mod tx;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use account::{
    encode_icrc_account, format_icp_account, Account, AccountError, EncodedAccount, EvmAccount,
    IcpAccount, IcrcAccount, Subaccount,
};
pub use amount::{format_tokens, Amount, AmountError};
pub use backoff::{next_delay, Backoff};
pub use chain::{Chain, Deployment, EvmChain, OperatingMode, Token};
pub use clock::{Clock, SystemClock};
pub use config::{explorer_tx_link, Config, ConfigError, Confirmations, DEFAULT_POLL_DELAY_MS};
pub use fee::{check_amount, find_fee, ExpectedFee, FeeCheckError, TransferFee};
pub use status::{Failed, Refunded, Running, RunningDetail, StepStatus, StepStatusKind, Succeeded};
pub use transfer::{
    AssetInfo, DestinationProgress, ForwardingResponse, ForwardingStatus, TraceEntry, TraceEvent,
    Transfer, TransferResponse, TransferStatus,
};
pub use tx::{EvmTx, IcpTx, TransferId, Tx};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
