//! # Policy Engine Adapters
//!
//! Concrete [`PolicyEngine`] implementations. The engine itself never
//! evaluates policy; these adapters cover the common deployments and the
//! test seams.

use crate::domain::{AuthAction, StateEngineError, WriteRequest};
use crate::ports::PolicyEngine;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Accepts every action. Useful for single-operator ledgers and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAllPolicy;

impl PolicyEngine for AllowAllPolicy {
    fn evaluate(&self, _: &WriteRequest, _: &AuthAction) -> Result<(), StateEngineError> {
        Ok(())
    }
}

/// Authorizes adds and edits against fixed author allow-lists.
#[derive(Clone, Debug, Default)]
pub struct TrustedAuthorsPolicy {
    add_authors: HashSet<String>,
    edit_authors: HashSet<String>,
}

impl TrustedAuthorsPolicy {
    pub fn new<A, E>(add_authors: A, edit_authors: E) -> Self
    where
        A: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        Self {
            add_authors: add_authors.into_iter().collect(),
            edit_authors: edit_authors.into_iter().collect(),
        }
    }
}

impl PolicyEngine for TrustedAuthorsPolicy {
    fn evaluate(
        &self,
        request: &WriteRequest,
        action: &AuthAction,
    ) -> Result<(), StateEngineError> {
        let (allowed, verb) = match action {
            AuthAction::Add { .. } => (&self.add_authors, "add"),
            AuthAction::Edit { .. } => (&self.edit_authors, "edit"),
        };
        if !allowed.contains(&request.author_id) {
            return Err(StateEngineError::Unauthorized {
                reason: format!("author {} may not {} records", request.author_id, verb),
            });
        }
        Ok(())
    }
}

/// Wraps another policy and records every evaluated action.
///
/// Lets tests assert on the add/edit disambiguation without reaching into
/// the engine.
pub struct RecordingPolicy<P: PolicyEngine> {
    inner: P,
    evaluated: RwLock<Vec<AuthAction>>,
}

impl<P: PolicyEngine> RecordingPolicy<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            evaluated: RwLock::new(Vec::new()),
        }
    }

    pub fn evaluated(&self) -> Vec<AuthAction> {
        self.evaluated.read().clone()
    }
}

impl<P: PolicyEngine> PolicyEngine for RecordingPolicy<P> {
    fn evaluate(
        &self,
        request: &WriteRequest,
        action: &AuthAction,
    ) -> Result<(), StateEngineError> {
        self.evaluated.write().push(action.clone());
        self.inner.evaluate(request, action)
    }
}
