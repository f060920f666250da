use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AtomId, ScenarioId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidTransfer,
    NotFound,
    ProviderFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The scenario already reached its final state.
    AlreadyComplete,
    /// No requirement links the two atoms.
    NoRequirement,
    /// The requirement between the two atoms is already satisfied.
    RequirementSatisfied,
    /// The source atom has no electron left to give.
    SourceDepleted,
    /// The target atom has no empty slot left.
    TargetFull,
    /// The donor is not a source or the acceptor is not a target.
    RoleMismatch,
    /// The snapshot was produced for another scenario.
    ForeignState,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedoxError {
    #[error("invalid transfer {from}->{to}: {reason:?}")]
    InvalidTransfer {
        from: AtomId,
        to: AtomId,
        reason: RejectReason,
    },
    #[error("scenario '{0}' not found")]
    NotFound(ScenarioId),
    #[error("explanation provider failed: {0}")]
    ProviderFailure(String),
}

impl RedoxError {
    pub fn invalid_transfer(from: &AtomId, to: &AtomId, reason: RejectReason) -> Self {
        Self::InvalidTransfer {
            from: from.clone(),
            to: to.clone(),
            reason,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTransfer { .. } => ErrorCode::InvalidTransfer,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::ProviderFailure(_) => ErrorCode::ProviderFailure,
        }
    }
}
