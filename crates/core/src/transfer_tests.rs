// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn entry(chain: Chain, event: TraceEvent, ok: bool) -> TraceEntry {
    TraceEntry {
        chain: Some(chain),
        event: Some(event),
        result: Some(if ok { Ok(()) } else { Err("boom".to_string()) }),
    }
}

fn transfer_with(trace: Vec<TraceEntry>) -> Transfer {
    Transfer {
        source: AssetInfo::default(),
        destination: AssetInfo::default(),
        status: Some(TransferStatus::PendingDestinationTx),
        trace,
    }
}

#[test]
fn empty_trace_is_unknown() {
    assert_eq!(transfer_with(vec![]).destination_progress(EvmChain::Base), DestinationProgress::Unknown);
}

#[yare::parameterized(
    fetch = { TraceEvent::FetchTx, DestinationProgress::Unknown },
    sign = { TraceEvent::SignTx, DestinationProgress::Signed },
    send = { TraceEvent::SendTx, DestinationProgress::Sent },
    pending_confirm = { TraceEvent::PendingConfirmTx, DestinationProgress::Executed },
    confirm = { TraceEvent::ConfirmTx, DestinationProgress::Executed },
)]
fn trace_event_maps_to_progress(event: TraceEvent, expected: DestinationProgress) {
    let transfer = transfer_with(vec![entry(Chain::Base, event, true)]);
    assert_eq!(transfer.destination_progress(EvmChain::Base), expected);
}

#[test]
fn progress_takes_furthest_event_regardless_of_order() {
    let transfer = transfer_with(vec![
        entry(Chain::Base, TraceEvent::SendTx, true),
        entry(Chain::Base, TraceEvent::SignTx, true),
    ]);
    assert_eq!(transfer.destination_progress(EvmChain::Base), DestinationProgress::Sent);
}

#[test]
fn failed_entries_and_other_chains_are_ignored() {
    let transfer = transfer_with(vec![
        entry(Chain::Base, TraceEvent::SendTx, false),
        entry(Chain::Arbitrum, TraceEvent::ConfirmTx, true),
        entry(Chain::Icp, TraceEvent::ConfirmTx, true),
        entry(Chain::Base, TraceEvent::SignTx, true),
    ]);
    assert_eq!(transfer.destination_progress(EvmChain::Base), DestinationProgress::Signed);
}

#[yare::parameterized(
    pending_source = { TransferStatus::PendingSourceTx, false },
    pending_destination = { TransferStatus::PendingDestinationTx, false },
    pending_refund = { TransferStatus::PendingRefundTx, false },
    succeeded = { TransferStatus::Succeeded, true },
    refunded = { TransferStatus::Refunded(None), true },
    failed = { TransferStatus::Failed { error: "x".into() }, true },
)]
fn terminal_statuses(status: TransferStatus, terminal: bool) {
    assert_eq!(status.is_terminal(), terminal);
}
