//! # Ledger Tail
//!
//! Ordered transactions awaiting finality, each tagged with the working-root
//! snapshot taken immediately before it was applied.
//!
//! The tail is consumed from opposite ends by its two exits: finality drains
//! from the front (FIFO) into the committed log, revert truncates from the
//! back (LIFO). Sequence numbers are derived from position -
//! `committed + tail index + 1` - so truncation rolls the counter back
//! without separate bookkeeping.

use super::{Hash, StateEngineError, Transaction};

/// One uncommitted transaction plus its pre-apply root snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TailEntry {
    pub txn: Transaction,
    /// Working root immediately before this transaction was applied.
    pub pre_apply_root: Hash,
}

/// Committed transaction log plus the uncommitted tail.
pub struct LedgerTail {
    committed: Vec<Transaction>,
    tail: Vec<TailEntry>,
}

impl LedgerTail {
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            tail: Vec::new(),
        }
    }

    /// Uncommitted tail length.
    pub fn len(&self) -> usize {
        self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tail.is_empty()
    }

    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    /// Sequence number the next appended transaction will carry.
    pub fn next_seq_no(&self) -> u64 {
        (self.committed.len() + self.tail.len()) as u64 + 1
    }

    pub fn append(&mut self, txn: Transaction, pre_apply_root: Hash) {
        self.tail.push(TailEntry {
            txn,
            pre_apply_root,
        });
    }

    pub fn entries(&self) -> &[TailEntry] {
        &self.tail
    }

    pub fn committed(&self) -> &[Transaction] {
        &self.committed
    }

    /// Remove and return the last `count` entries, oldest first.
    ///
    /// Fails without mutating when `count` exceeds the tail length.
    pub fn truncate_last(&mut self, count: usize) -> Result<Vec<TailEntry>, StateEngineError> {
        if count > self.tail.len() {
            return Err(StateEngineError::RevertBeyondCommitted {
                requested: count,
                uncommitted: self.tail.len(),
            });
        }
        let split = self.tail.len() - count;
        Ok(self.tail.split_off(split))
    }

    /// Move the first `count` tail entries into the committed log.
    ///
    /// Fails without mutating when `count` exceeds the tail length.
    pub fn commit_front(&mut self, count: usize) -> Result<(), StateEngineError> {
        if count > self.tail.len() {
            return Err(StateEngineError::CommitBeyondTail {
                requested: count,
                uncommitted: self.tail.len(),
            });
        }
        for entry in self.tail.drain(..count) {
            self.committed.push(entry.txn);
        }
        Ok(())
    }
}

impl Default for LedgerTail {
    fn default() -> Self {
        Self::new()
    }
}
