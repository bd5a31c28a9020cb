// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step status: `Planned -> Running -> {Succeeded | Failed | Refunded}`.

use crate::amount::Amount;
use crate::fee::ExpectedFee;
use crate::transfer::DestinationProgress;
use crate::tx::{Tx, TransferId};
use serde::{Deserialize, Serialize};

/// Step-specific side data attached to a running step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunningDetail {
    Blocks { confirmed: u64, required: u64 },
    Destination(DestinationProgress),
    Balance { balance: u128, min_amount: u128 },
    Fetching { block_height: u64 },
    Transfer(TransferId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Running {
    pub description: String,
    pub detail: Option<RunningDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Succeeded {
    pub description: String,
    pub tx: Option<Tx>,
    pub amount: Option<Amount>,
    pub link: Option<String>,
    pub forwarding_address: Option<String>,
    pub expected_fee: Option<ExpectedFee>,
}

impl Succeeded {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tx: None,
            amount: None,
            link: None,
            forwarding_address: None,
            expected_fee: None,
        }
    }

    crate::setters! {
        option {
            tx: Tx,
            amount: Amount,
            link: String,
            forwarding_address: String,
            expected_fee: ExpectedFee,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failed {
    pub error: String,
    /// The transaction that reverted, when there is one.
    pub tx: Option<Tx>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refunded {
    pub description: String,
    pub tx: Option<Tx>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    #[default]
    Planned,
    Running(Running),
    Succeeded(Succeeded),
    Failed(Failed),
    Refunded(Refunded),
}

impl StepStatus {
    pub fn running(description: impl Into<String>) -> Self {
        StepStatus::Running(Running { description: description.into(), detail: None })
    }

    pub fn running_with(description: impl Into<String>, detail: RunningDetail) -> Self {
        StepStatus::Running(Running { description: description.into(), detail: Some(detail) })
    }

    pub fn failed(error: impl Into<String>) -> Self {
        StepStatus::Failed(Failed { error: error.into(), tx: None })
    }

    pub fn reverted(error: impl Into<String>, tx: impl Into<Tx>) -> Self {
        StepStatus::Failed(Failed { error: error.into(), tx: Some(tx.into()) })
    }

    pub fn refunded(description: impl Into<String>, tx: Option<Tx>) -> Self {
        StepStatus::Refunded(Refunded { description: description.into(), tx })
    }

    pub fn kind(&self) -> StepStatusKind {
        StepStatusKind::from(self)
    }

    /// Succeeded, Failed, or Refunded.
    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }

    /// Failed or Refunded: a plan stops here.
    pub fn is_halting(&self) -> bool {
        matches!(self, StepStatus::Failed(_) | StepStatus::Refunded(_))
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, StepStatus::Succeeded(_))
    }

    pub fn tx(&self) -> Option<&Tx> {
        match self {
            StepStatus::Succeeded(s) => s.tx.as_ref(),
            StepStatus::Failed(f) => f.tx.as_ref(),
            StepStatus::Refunded(r) => r.tx.as_ref(),
            _ => None,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            StepStatus::Planned => "planned",
            StepStatus::Running(r) => &r.description,
            StepStatus::Succeeded(s) => &s.description,
            StepStatus::Failed(f) => &f.error,
            StepStatus::Refunded(r) => &r.description,
        }
    }
}

impl From<Succeeded> for StepStatus {
    fn from(outcome: Succeeded) -> Self {
        StepStatus::Succeeded(outcome)
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Planned => f.write_str("planned"),
            _ => write!(f, "{}: {}", self.kind(), self.description()),
        }
    }
}

/// Status tag without payload, for logging and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatusKind {
    Planned,
    Running,
    Succeeded,
    Failed,
    Refunded,
}

crate::simple_display! {
    StepStatusKind {
        Planned => "planned",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
        Refunded => "refunded",
    }
}

impl StepStatusKind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Refunded)
    }
}

impl From<&StepStatus> for StepStatusKind {
    fn from(status: &StepStatus) -> Self {
        match status {
            StepStatus::Planned => StepStatusKind::Planned,
            StepStatus::Running(_) => StepStatusKind::Running,
            StepStatus::Succeeded(_) => StepStatusKind::Succeeded,
            StepStatus::Failed(_) => StepStatusKind::Failed,
            StepStatus::Refunded(_) => StepStatusKind::Refunded,
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
