//! Domain errors. Returned by the store, managers and the batch driver.
//!
//! Every variant is recoverable; the caller decides whether to retry or abort.

use crate::domain::EntityKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordsError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} ID {id} already exists")]
    DuplicateKey { kind: EntityKind, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Malformed input at the adapter boundary (undecodable command, unreadable source).
    #[error("Input error: {0}")]
    Input(String),
}

impl RecordsError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn duplicate(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::DuplicateKey {
            kind,
            id: id.into(),
        }
    }

    /// Stable machine-readable code, used in batch reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::IllegalState(_) => "illegal_state",
            Self::Input(_) => "input",
        }
    }
}
