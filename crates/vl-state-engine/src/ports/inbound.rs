use crate::domain::{Hash, StateEngineError, StateKey, StateValue, WriteRequest};

/// Inbound API of the state engine.
///
/// Write operations take `&mut self`: at most one apply/commit/revert
/// sequence may be in flight per engine instance, and callers serialize
/// through the surrounding ordering layer.
pub trait StateEngineApi {
    /// Validate, authorize and speculatively apply a write.
    ///
    /// Returns the derived state key, which is also the transaction's
    /// external identifier. `txn_time` is the ledger's transaction time.
    fn apply(&mut self, request: &WriteRequest, txn_time: u64)
        -> Result<StateKey, StateEngineError>;

    /// Finalize the first `count` uncommitted transactions.
    ///
    /// Returns the new committed root hash.
    fn commit(&mut self, count: usize) -> Result<Hash, StateEngineError>;

    /// Unwind the last `count` uncommitted transactions to `target_root`.
    fn revert(&mut self, target_root: Hash, count: usize) -> Result<(), StateEngineError>;

    /// Read a record from the committed or working view.
    fn get(&self, key: &StateKey, committed: bool)
        -> Result<Option<StateValue>, StateEngineError>;

    fn working_root(&self) -> Hash;

    fn committed_root(&self) -> Hash;

    /// Uncommitted tail length.
    fn uncommitted_count(&self) -> usize;

    fn committed_count(&self) -> usize;
}
