//! # Path Codec
//!
//! Derives the canonical state key for a record from its identity tuple
//! (author, name, version, kind).
//!
//! The derivation is pure and injective: equal tuples always produce equal
//! keys and any differing component produces a different key. Injectivity is
//! load-bearing for the whole store - the add/edit authorization decision and
//! every later lookup depend on exact key equality - so components carrying
//! the reserved separator are rejected instead of escaped.
//!
//! The derived key is also the transaction identifier. Because it is a pure
//! function of content and author identity, identical retries resolve to the
//! same identifier, which is the engine's deduplication mechanism.

use super::{RecordKind, StateKey, StateEngineError};

/// Reserved separator between key components.
pub const KEY_SEPARATOR: char = ':';

/// Derive the state key `<author_id>:<marker>:<name>:<version>`.
pub fn derive(
    author_id: &str,
    name: &str,
    version: &str,
    kind: RecordKind,
) -> Result<StateKey, StateEngineError> {
    Ok(StateKey::from_bytes(
        derive_string(author_id, name, version, kind)?.into_bytes(),
    ))
}

/// Derive the transaction identifier for a record.
///
/// Same derivation as [`derive`], rendered as a string. Exposed separately
/// because callers use it as an external identifier, not a lookup key.
pub fn transaction_id(
    author_id: &str,
    name: &str,
    version: &str,
    kind: RecordKind,
) -> Result<String, StateEngineError> {
    derive_string(author_id, name, version, kind)
}

fn derive_string(
    author_id: &str,
    name: &str,
    version: &str,
    kind: RecordKind,
) -> Result<String, StateEngineError> {
    check_component("author_id", author_id)?;
    check_component("name", name)?;
    check_component("version", version)?;
    Ok(format!(
        "{author_id}{sep}{marker}{sep}{name}{sep}{version}",
        sep = KEY_SEPARATOR,
        marker = kind.marker(),
    ))
}

fn check_component(field: &'static str, value: &str) -> Result<(), StateEngineError> {
    if value.is_empty() || value.contains(KEY_SEPARATOR) {
        return Err(StateEngineError::InvalidIdentifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
