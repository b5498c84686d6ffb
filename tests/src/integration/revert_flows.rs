//! # Revert Flow Integration
//!
//! Models the consensus interaction: a batch of writes is applied
//! optimistically, then either finalized (commit) or rejected (revert to the
//! pre-batch root). Checks that revert leaves no residue even when records
//! from different kinds and authors interleave inside the batch.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use vl_state_engine::adapters::{AllowAllPolicy, JsonValueCodec};
    use vl_state_engine::domain::{
        Hash, RecordKind, RequestData, StateEngineError, StateKey, WriteRequest,
    };
    use vl_state_engine::ports::StateEngineApi;
    use vl_state_engine::service::StateEngineService;

    type Engine = StateEngineService<AllowAllPolicy, JsonValueCodec>;

    fn engine() -> Engine {
        StateEngineService::with_defaults(AllowAllPolicy, JsonValueCodec)
    }

    fn context_request(author: &str, name: &str, uri: &str) -> WriteRequest {
        WriteRequest {
            author_id: author.into(),
            kind: RecordKind::JsonLdContext,
            data: RequestData {
                name: name.into(),
                version: "1.0".into(),
                body: json!({ "@context": uri }),
            },
        }
    }

    fn schema_request(author: &str, name: &str) -> WriteRequest {
        WriteRequest {
            author_id: author.into(),
            kind: RecordKind::Schema,
            data: RequestData {
                name: name.into(),
                version: "1.0".into(),
                body: json!({ "attr_names": ["a", "b"] }),
            },
        }
    }

    /// Apply a batch and return the pre-batch root plus the written keys.
    fn apply_batch(engine: &mut Engine, requests: &[WriteRequest]) -> (Hash, Vec<StateKey>) {
        let pre_root = engine.working_root();
        let keys = requests
            .iter()
            .enumerate()
            .map(|(i, request)| engine.apply(request, 1_700_000_000 + i as u64).unwrap())
            .collect();
        (pre_root, keys)
    }

    #[test]
    fn rejected_batch_unwinds_to_the_pre_batch_root() {
        let mut engine = engine();

        // Finalized base state.
        engine
            .apply(&context_request("A1", "base", "https://example.org/base"), 1)
            .unwrap();
        engine.commit(1).unwrap();
        let committed_root = engine.committed_root();

        // Speculative batch with interleaved kinds and authors.
        let (pre_root, keys) = apply_batch(
            &mut engine,
            &[
                context_request("A1", "doc", "https://example.org/v1"),
                schema_request("A2", "doc"),
                context_request("A2", "doc", "https://example.org/v2"),
            ],
        );
        assert_eq!(pre_root, engine.committed_root());
        assert_eq!(engine.uncommitted_count(), 3);

        // Consensus rejects the whole batch.
        engine.revert(pre_root, 3).unwrap();

        assert_eq!(engine.working_root(), pre_root);
        assert_eq!(engine.committed_root(), committed_root);
        assert_eq!(engine.uncommitted_count(), 0);
        for key in &keys {
            assert!(engine.get(key, false).unwrap().is_none());
        }
    }

    #[test]
    fn partial_rejection_keeps_the_surviving_prefix() {
        let mut engine = engine();

        engine
            .apply(&context_request("A1", "doc", "https://example.org/v1"), 1)
            .unwrap();
        let root_after_tx1 = engine.working_root();

        // tx2 edits the record tx1 created; tx3 adds an unrelated one.
        engine
            .apply(&context_request("A1", "doc", "https://example.org/v2"), 2)
            .unwrap();
        engine
            .apply(&schema_request("A1", "other"), 3)
            .unwrap();

        engine.revert(root_after_tx1, 2).unwrap();

        assert_eq!(engine.uncommitted_count(), 1);
        assert_eq!(engine.working_root(), root_after_tx1);

        // The edit was unwound to its prior value, not removed.
        let doc = vl_state_engine::domain::path::derive(
            "A1",
            "doc",
            "1.0",
            RecordKind::JsonLdContext,
        )
        .unwrap();
        let value = engine.get(&doc, false).unwrap().unwrap();
        assert_eq!(value.body, json!({ "@context": "https://example.org/v1" }));
        assert_eq!(value.seq_no, 1);
    }

    #[test]
    fn interleaved_batches_commit_and_revert_independently() {
        let mut engine = engine();

        // Batch 1 finalizes.
        let (_, batch1_keys) = apply_batch(
            &mut engine,
            &[
                context_request("A1", "one", "https://example.org/1"),
                schema_request("A1", "one"),
            ],
        );
        engine.commit(2).unwrap();

        // Batch 2 is rejected.
        let (pre_batch2, batch2_keys) = apply_batch(
            &mut engine,
            &[
                context_request("A2", "two", "https://example.org/2"),
                context_request("A1", "one", "https://example.org/override"),
            ],
        );
        engine.revert(pre_batch2, 2).unwrap();

        // Batch 1 records survive with their original content.
        assert_eq!(
            engine.get(&batch1_keys[0], false).unwrap().unwrap().body,
            json!({ "@context": "https://example.org/1" })
        );
        // Batch 2 additions are gone; the batch 2 edit of a committed record
        // reads back as the committed value.
        assert!(engine.get(&batch2_keys[0], false).unwrap().is_none());
        assert_eq!(
            engine.get(&batch2_keys[1], true).unwrap().unwrap().body,
            json!({ "@context": "https://example.org/1" })
        );
        assert_eq!(engine.working_root(), engine.committed_root());
    }

    #[test]
    fn stale_root_from_another_batch_is_rejected() {
        let mut engine = engine();

        engine
            .apply(&context_request("A1", "one", "https://example.org/1"), 1)
            .unwrap();
        let root_after_tx1 = engine.working_root();
        engine
            .apply(&context_request("A1", "two", "https://example.org/2"), 2)
            .unwrap();

        // Reverting only tx2 but naming tx1's boundary root must abort.
        let err = engine.revert([0xCC; 32], 1).unwrap_err();
        assert!(matches!(err, StateEngineError::RevertInvariant { .. }));

        // Correct boundary still works afterwards; nothing was mutated.
        engine.revert(root_after_tx1, 1).unwrap();
        assert_eq!(engine.working_root(), root_after_tx1);
    }

    #[test]
    fn revert_after_full_commit_has_nothing_to_unwind() {
        let mut engine = engine();
        let genesis_root = engine.working_root();

        engine
            .apply(&context_request("A1", "one", "https://example.org/1"), 1)
            .unwrap();
        engine.commit(1).unwrap();

        assert_eq!(
            engine.revert(genesis_root, 1).unwrap_err(),
            StateEngineError::RevertBeyondCommitted {
                requested: 1,
                uncommitted: 0
            }
        );
        // count = 0 remains a no-op even against a stale target.
        engine.revert(genesis_root, 0).unwrap();
        assert_eq!(engine.committed_count(), 1);
    }
}
