//! Error types for drill-core.

use thiserror::Error;

/// Result type alias using DrillError.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Operational errors surfaced to the caller during a session.
///
/// All of these are recoverable: the caller shows a degraded state and lets
/// the user change filters or reload data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrillError {
    /// The active (filtered) pool has no items to draw from.
    #[error("no items match the active filters")]
    EmptyPool,

    /// `submit`/`reveal` was called before any item was drawn.
    #[error("no current item; draw one first")]
    NoCurrentItem,
}

/// Why a record was dropped at load time.
///
/// Non-fatal and aggregated: the pool drops the record, keeps loading, and
/// reports the rejects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("missing id")]
    MissingId,

    #[error("missing primary answer")]
    MissingPrimaryAnswer,

    #[error("two-step item is missing its secondary answer")]
    MissingSecondaryAnswer,

    #[error("unrecognized mode {value:?}")]
    UnknownMode { value: String },

    #[error("duplicate id {id}")]
    DuplicateId { id: String },
}
