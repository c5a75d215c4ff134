//! # Store Errors
//!
//! Error types for the sequence store.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a [`SequenceStore`](super::SequenceStore).
///
/// `NoRows` is the store's way of signalling that a lookup matched no
/// record, distinct from an infrastructure failure. The service layer
/// passes these upward unchanged; classification happens at the HTTP
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A lookup matched no record
    #[error("no rows in result set")]
    NoRows,

    /// The backing store failed to execute a statement
    #[error("store error: {0}")]
    Backend(String),
}
