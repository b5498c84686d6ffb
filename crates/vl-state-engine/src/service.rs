//! # State Engine Service
//!
//! Wires the path codec, payload validators, authorization resolution,
//! state store and ledger tail into the write path of one ledger instance.
//!
//! ## Operation Ordering
//!
//! `apply` runs its steps in a fixed order so that every rejection happens
//! before any mutation:
//!
//! 1. Key component length bound (resource guard, no state access)
//! 2. Kind routing (`TypeMismatch` if no validator is registered)
//! 3. Static payload validation (no state access)
//! 4. Key derivation
//! 5. Add/edit resolution against the working view
//! 6. Policy evaluation through the outbound port (may block)
//! 7. Write + tail append (one atomic step from the caller's view)
//!
//! ## Transaction Lifecycle
//!
//! ```text
//! Applied (uncommitted) ──commit──→ Committed   (terminal)
//! Applied (uncommitted) ──revert──→ Reverted    (terminal, prior value restored)
//! ```
//!
//! An interrupted apply or revert is a fatal store-consistency event; the
//! surrounding runtime must reload from the committed root instead of
//! retrying against mutated state.

use crate::domain::{
    authorize, path, EngineConfig, Hash, LedgerTail, StateEngineError, StateKey, StateStore,
    StateValue, Transaction, ValidatorRegistry, WriteRequest,
};
use crate::ports::{PolicyEngine, StateEngineApi, ValueCodec};
use tracing::{debug, info, warn};

/// The state engine for one ledger instance.
///
/// All collaborators are injected; the engine owns the store and tail for
/// its lifetime (opened at ledger start, dropped at ledger stop).
pub struct StateEngineService<P, C>
where
    P: PolicyEngine,
    C: ValueCodec,
{
    config: EngineConfig,
    validators: ValidatorRegistry,
    policy: P,
    codec: C,
    store: StateStore,
    ledger: LedgerTail,
}

impl<P, C> StateEngineService<P, C>
where
    P: PolicyEngine,
    C: ValueCodec,
{
    pub fn new(config: EngineConfig, validators: ValidatorRegistry, policy: P, codec: C) -> Self {
        Self {
            config,
            validators,
            policy,
            codec,
            store: StateStore::open(),
            ledger: LedgerTail::new(),
        }
    }

    /// Engine with the shipped validators and default configuration.
    pub fn with_defaults(policy: P, codec: C) -> Self {
        Self::new(
            EngineConfig::default(),
            ValidatorRegistry::with_defaults(),
            policy,
            codec,
        )
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Length bound on every key component, checked before any other work
    /// so oversized identifiers never reach key derivation or the store.
    fn check_component_lengths(&self, request: &WriteRequest) -> Result<(), StateEngineError> {
        let max = self.config.max_key_component_len;
        for (field, value) in [
            ("author_id", request.author_id.as_str()),
            ("name", request.data.name.as_str()),
            ("version", request.data.version.as_str()),
        ] {
            if value.len() > max {
                return Err(StateEngineError::KeyComponentTooLong {
                    field,
                    len: value.len(),
                    max,
                });
            }
        }
        Ok(())
    }

    /// Kind routing plus static payload validation. No state access.
    fn static_validation(&self, request: &WriteRequest) -> Result<(), StateEngineError> {
        let validator = self
            .validators
            .get(request.kind)
            .ok_or(StateEngineError::TypeMismatch { kind: request.kind })?;
        validator.validate(&request.data)
    }

    /// Add/edit resolution plus policy evaluation. Reads state, never
    /// writes it.
    fn dynamic_validation(
        &self,
        request: &WriteRequest,
        key: &StateKey,
    ) -> Result<(), StateEngineError> {
        let action = authorize::resolve(&self.store, key);
        debug!(
            "[StateEngine] resolved {} as {}",
            key,
            if action.is_edit() { "edit" } else { "add" }
        );
        self.policy.evaluate(request, &action)
    }
}

impl<P, C> StateEngineApi for StateEngineService<P, C>
where
    P: PolicyEngine,
    C: ValueCodec,
{
    fn apply(
        &mut self,
        request: &WriteRequest,
        txn_time: u64,
    ) -> Result<StateKey, StateEngineError> {
        self.check_component_lengths(request)?;
        self.static_validation(request)?;

        let key = path::derive(
            &request.author_id,
            &request.data.name,
            &request.data.version,
            request.kind,
        )?;

        self.dynamic_validation(request, &key)?;

        let len = self.ledger.len();
        if len >= self.config.max_uncommitted_txns {
            warn!("[StateEngine] uncommitted tail at capacity ({len})");
            return Err(StateEngineError::TailLimitExceeded {
                len,
                max: self.config.max_uncommitted_txns,
            });
        }

        let seq_no = self.ledger.next_seq_no();
        let value = StateValue {
            body: request.data.body.clone(),
            seq_no,
            txn_time,
        };
        let value_bytes = self.codec.encode(&value)?;

        // Snapshot, write, append: one atomic step from here on.
        let pre_apply_root = self.store.working_root();
        self.store.set(&key, value_bytes.clone());
        self.ledger.append(
            Transaction {
                key: key.clone(),
                value_bytes,
                seq_no,
                txn_time,
            },
            pre_apply_root,
        );

        info!(
            "[StateEngine] applied seq_no={} key={} root={}",
            seq_no,
            key,
            hex::encode(self.store.working_root())
        );
        Ok(key)
    }

    fn commit(&mut self, count: usize) -> Result<Hash, StateEngineError> {
        if count == 0 {
            return Ok(self.store.committed_root());
        }
        let tail_len = self.ledger.len();
        if count > tail_len {
            return Err(StateEngineError::CommitBeyondTail {
                requested: count,
                uncommitted: tail_len,
            });
        }

        let writes: Vec<(StateKey, Vec<u8>)> = self.ledger.entries()[..count]
            .iter()
            .map(|entry| (entry.txn.key.clone(), entry.txn.value_bytes.clone()))
            .collect();
        self.store.promote(&writes);
        self.ledger.commit_front(count)?;

        let root = self.store.committed_root();
        info!(
            "[StateEngine] committed {} txn(s), committed_root={}",
            count,
            hex::encode(root)
        );
        Ok(root)
    }

    fn revert(&mut self, target_root: Hash, count: usize) -> Result<(), StateEngineError> {
        if count == 0 {
            debug!("[StateEngine] revert of 0 txns is a no-op");
            return Ok(());
        }
        let tail_len = self.ledger.len();
        if count > tail_len {
            return Err(StateEngineError::RevertBeyondCommitted {
                requested: count,
                uncommitted: tail_len,
            });
        }

        // The snapshot recorded before the first removed entry must match
        // the target; checked before any mutation so a mismatch aborts the
        // whole revert.
        let boundary = tail_len - count;
        let recorded = self.ledger.entries()[boundary].pre_apply_root;
        if recorded != target_root {
            return Err(StateEngineError::RevertInvariant {
                expected: target_root,
                actual: recorded,
            });
        }

        let removed = self.ledger.truncate_last(count)?;

        // Rebuild the working view from the committed view plus the
        // surviving tail. Edits land back on their prior values instead of
        // disappearing.
        self.store.reset_working_to_committed();
        for entry in self.ledger.entries() {
            self.store.set(&entry.txn.key, entry.txn.value_bytes.clone());
        }

        let rebuilt = self.store.working_root();
        if rebuilt != target_root {
            // The tail's snapshot chain no longer describes the store. Not
            // locally recoverable; the surrounding ledger must halt.
            warn!(
                "[StateEngine] revert rebuilt root {} != target {}",
                hex::encode(rebuilt),
                hex::encode(target_root)
            );
            return Err(StateEngineError::RevertInvariant {
                expected: target_root,
                actual: rebuilt,
            });
        }

        info!(
            "[StateEngine] reverted {} txn(s) to root={}",
            removed.len(),
            hex::encode(target_root)
        );
        Ok(())
    }

    fn get(
        &self,
        key: &StateKey,
        committed: bool,
    ) -> Result<Option<StateValue>, StateEngineError> {
        match self.store.get(key, committed) {
            Some(bytes) => Ok(Some(self.codec.decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn working_root(&self) -> Hash {
        self.store.working_root()
    }

    fn committed_root(&self) -> Hash {
        self.store.committed_root()
    }

    fn uncommitted_count(&self) -> usize {
        self.ledger.len()
    }

    fn committed_count(&self) -> usize {
        self.ledger.committed_count()
    }
}
