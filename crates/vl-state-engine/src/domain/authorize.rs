//! # Authorization Resolution
//!
//! Decides whether a write is an **add** (key absent) or an **edit** (key
//! present) and shapes the action descriptor handed to the policy engine.
//!
//! A record's identity is its derived key, not a separate "exists" flag, so
//! the disambiguation must be a state lookup against the working view. This
//! also stops a client from forging an "add" to overwrite an edit-protected
//! record. Policy evaluation itself lives behind the
//! [`PolicyEngine`](crate::ports::PolicyEngine) port; this module never
//! implements it.

use super::{StateKey, StateStore};

/// Marks whole-record granularity; partial-field authorization is not
/// supported at this layer.
pub const WHOLE_RECORD: &str = "*";

/// Action descriptor consumed by the policy engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Add {
        field: String,
        value: String,
    },
    Edit {
        field: String,
        old_value: String,
        new_value: String,
    },
}

impl AuthAction {
    pub fn add_whole_record() -> Self {
        AuthAction::Add {
            field: WHOLE_RECORD.into(),
            value: WHOLE_RECORD.into(),
        }
    }

    pub fn edit_whole_record() -> Self {
        AuthAction::Edit {
            field: WHOLE_RECORD.into(),
            old_value: WHOLE_RECORD.into(),
            new_value: WHOLE_RECORD.into(),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, AuthAction::Edit { .. })
    }
}

/// Resolve the action descriptor for a derived key.
///
/// Probes the **working** view: a record added by an uncommitted
/// transaction is already an edit target for later requests in the same
/// batch.
pub fn resolve(store: &StateStore, key: &StateKey) -> AuthAction {
    if store.get(key, false).is_some() {
        AuthAction::edit_whole_record()
    } else {
        AuthAction::add_whole_record()
    }
}
