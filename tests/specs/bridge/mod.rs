// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod evm_to_icp;
mod forwarding;
mod icp_to_evm;
mod resume;
