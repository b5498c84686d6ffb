//! # Versioned State Store
//!
//! Key-value store with a committed view and a working view, each
//! fingerprinted by a content-derived root hash.
//!
//! - **Committed view**: reflects only finalized transactions.
//! - **Working view**: committed plus uncommitted-but-applied writes.
//!
//! Every write mutates the working view and advances the working root; the
//! committed view advances only through [`StateStore::promote`] when the
//! ledger confirms finality. The root hash is Keccak256 over the
//! length-prefixed (key, value) pairs in key order, so two stores holding the
//! same records always report the same root regardless of write order.
//!
//! Lifecycle is explicit: [`StateStore::open`] at ledger start, dropped at
//! ledger stop. There is no global state.

use super::{Hash, StateKey, EMPTY_STATE_ROOT};
use sha3::{Digest, Keccak256};
use std::collections::BTreeMap;

pub struct StateStore {
    committed: BTreeMap<Vec<u8>, Vec<u8>>,
    working: BTreeMap<Vec<u8>, Vec<u8>>,
    committed_root: Hash,
    working_root: Hash,
}

impl StateStore {
    pub fn open() -> Self {
        Self {
            committed: BTreeMap::new(),
            working: BTreeMap::new(),
            committed_root: EMPTY_STATE_ROOT,
            working_root: EMPTY_STATE_ROOT,
        }
    }

    pub fn working_root(&self) -> Hash {
        self.working_root
    }

    pub fn committed_root(&self) -> Hash {
        self.committed_root
    }

    /// Read a record from the selected view.
    pub fn get(&self, key: &StateKey, committed: bool) -> Option<&[u8]> {
        let view = if committed { &self.committed } else { &self.working };
        view.get(key.as_bytes()).map(|value| value.as_slice())
    }

    /// Write into the working view and advance the working root.
    pub fn set(&mut self, key: &StateKey, value: Vec<u8>) {
        self.working.insert(key.as_bytes().to_vec(), value);
        self.working_root = compute_root(&self.working);
    }

    /// Fold finalized writes into the committed view.
    pub fn promote(&mut self, writes: &[(StateKey, Vec<u8>)]) {
        for (key, value) in writes {
            self.committed
                .insert(key.as_bytes().to_vec(), value.clone());
        }
        self.committed_root = compute_root(&self.committed);
    }

    /// Discard the working view and restart it from the committed view.
    ///
    /// Revert rebuilds state from here by replaying the surviving tail, so
    /// an edited record reads back as its prior value, not as absent.
    pub fn reset_working_to_committed(&mut self) {
        self.working = self.committed.clone();
        self.working_root = self.committed_root;
    }

    /// Number of records in the selected view.
    pub fn len(&self, committed: bool) -> usize {
        if committed {
            self.committed.len()
        } else {
            self.working.len()
        }
    }

    pub fn is_empty(&self, committed: bool) -> bool {
        self.len(committed) == 0
    }
}

fn compute_root(view: &BTreeMap<Vec<u8>, Vec<u8>>) -> Hash {
    if view.is_empty() {
        return EMPTY_STATE_ROOT;
    }

    let mut hasher = Keccak256::new();
    for (key, value) in view {
        hasher.update((key.len() as u32).to_be_bytes());
        hasher.update(key);
        hasher.update((value.len() as u32).to_be_bytes());
        hasher.update(value);
    }
    hasher.finalize().into()
}
