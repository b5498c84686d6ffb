use super::{Hash, RecordKind};
use thiserror::Error;

/// Errors surfaced by the state engine.
///
/// Every validation variant is raised before any mutation, so a rejected
/// request needs no rollback. The revert variants signal that the ledger and
/// state store have diverged from their expected relationship; callers must
/// propagate them and halt rather than retry against mutated state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateEngineError {
    /// A key component contains the reserved separator or is empty.
    #[error("invalid identifier in {field}: {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },

    /// A key component exceeds the configured length bound.
    #[error("key component {field} too long: {len} bytes exceeds limit of {max}")]
    KeyComponentTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Request payload failed shape or content validation.
    #[error("payload validation failed: {0}")]
    PayloadValidation(String),

    /// Request routed to a handler that does not serve its record kind.
    #[error("no handler registered for record kind {kind:?}")]
    TypeMismatch { kind: RecordKind },

    /// The policy engine rejected the resolved action.
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Revert target does not match the recorded pre-apply snapshot, or the
    /// rebuilt working view did not land on the target root.
    #[error(
        "revert invariant violated: expected root {}, found {}",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    RevertInvariant { expected: Hash, actual: Hash },

    /// Attempted to revert past the committed boundary.
    #[error("cannot revert {requested} transaction(s): uncommitted tail holds {uncommitted}")]
    RevertBeyondCommitted { requested: usize, uncommitted: usize },

    /// Attempted to commit more transactions than the tail holds.
    #[error("cannot commit {requested} transaction(s): uncommitted tail holds {uncommitted}")]
    CommitBeyondTail { requested: usize, uncommitted: usize },

    /// Uncommitted tail reached its configured bound.
    #[error("uncommitted tail limit reached: {len} of {max}")]
    TailLimitExceeded { len: usize, max: usize },

    /// State value could not be encoded or decoded.
    #[error("state value codec error: {0}")]
    Codec(String),
}
