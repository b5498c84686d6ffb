//! # Domain Entities
//!
//! Core data structures for the state engine.
//!
//! ## Type Decisions
//!
//! - `body: serde_json::Value` - record payloads are arbitrary structured
//!   values; the engine never interprets them beyond validation.
//! - `StateKey(Vec<u8>)` - keys are byte strings because the persisted key
//!   format is a byte encoding, not a Rust string, even though every key this
//!   engine derives happens to be valid UTF-8.
//! - `seq_no: u64` - ledger-wide sequence numbers, assigned at append time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub type Hash = [u8; 32];

/// Root hash of a state holding no records.
pub const EMPTY_STATE_ROOT: Hash = [0u8; 32];

/// Discriminates which payload validator and path marker apply to a record.
///
/// Markers must be globally distinct across every kind sharing one state
/// store; `marker()` is the single authority for that mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// JSON-LD context documents, anchored by an `@context` field.
    JsonLdContext,
    /// Attribute schema documents.
    Schema,
}

impl RecordKind {
    /// Short fixed token embedded in every derived state key.
    pub const fn marker(self) -> &'static str {
        match self {
            RecordKind::JsonLdContext => "ctx",
            RecordKind::Schema => "sch",
        }
    }
}

/// Inbound write request, already unwrapped from its signed envelope.
///
/// Signature and identity verification happen upstream; by the time a
/// request reaches this engine, `author_id` is trusted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// Opaque identity of the record author.
    pub author_id: String,
    /// Which handler the request was routed to.
    pub kind: RecordKind,
    /// The record being written.
    pub data: RequestData,
}

/// Payload portion of a write request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    pub name: String,
    pub version: String,
    /// Arbitrary structured record body.
    pub body: Value,
}

/// Canonical state key for one record.
///
/// Derived as `<author_id>:<marker>:<name>:<version>`; distinct
/// (author, name, version, kind) tuples never collide because components may
/// not contain the separator. The key doubles as the transaction identifier,
/// which makes identical retries resolve to the same identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Vec<u8>);

impl StateKey {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        StateKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Decoded form of the value stored at a [`StateKey`].
///
/// `seq_no` and `txn_time` come from the ledger, not from the caller's
/// wall clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateValue {
    pub body: Value,
    pub seq_no: u64,
    pub txn_time: u64,
}

/// A single applied transaction.
///
/// Carries the exact state write (`key`, `value_bytes`) so a revert can
/// rebuild the working view without re-running validation or the value
/// codec. Record identity metadata (author, kind, name, version) is not
/// duplicated here: the key embeds all four components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub key: StateKey,
    /// Encoded state value exactly as written to the store.
    pub value_bytes: Vec<u8>,
    pub seq_no: u64,
    pub txn_time: u64,
}

/// Engine configuration.
///
/// Both fields are resource-exhaustion limits: oversized key components
/// would bloat every root computation, and an unbounded tail would let a
/// stalled consensus layer grow memory without limit.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Maximum byte length of any single key component.
    pub max_key_component_len: usize,
    /// Maximum number of uncommitted transactions held in the tail.
    pub max_uncommitted_txns: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_key_component_len: 256,
            max_uncommitted_txns: 10_000,
        }
    }
}
