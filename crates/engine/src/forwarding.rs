// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forwarding-address calls outside a plan, for callers that show the
//! deposit address first and build the plan later.

use crate::error::BuildError;
use crate::steps::derive_forwarding_address;
use onesec_adapters::{AddressDeriver, ForwardingRequest, SettlementAdapter};
use onesec_core::{Deployment, EvmChain, ForwardingResponse, IcrcAccount, Token};

/// Derives the forwarding address of `receiver` and has the canister
/// confirm it.
pub async fn forwarding_address<S, D>(
    settlement: &S,
    deriver: &D,
    deployment: Deployment,
    receiver: &IcrcAccount,
) -> Result<String, BuildError>
where
    S: SettlementAdapter,
    D: AddressDeriver,
{
    let address = derive_forwarding_address(deriver, deployment, receiver)?;
    settlement.validate_forwarding_address(receiver, &address).await?;
    tracing::debug!(%receiver, %address, "forwarding address validated");
    Ok(address)
}

/// Tells the canister that `address` was funded.
pub async fn notify_forwarding_payment<S: SettlementAdapter>(
    settlement: &S,
    token: Token,
    chain: EvmChain,
    address: impl Into<String>,
    receiver: IcrcAccount,
) -> Result<ForwardingResponse, BuildError> {
    let request = ForwardingRequest { token, chain, address: address.into(), receiver };
    let response = settlement.forward_evm_to_icp(&request).await?;
    tracing::info!(%token, %chain, address = %request.address, done = ?response.done, "notified forwarding payment");
    Ok(response)
}

#[cfg(test)]
#[path = "forwarding_tests.rs"]
mod tests;
