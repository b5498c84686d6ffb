use crate::domain::{AuthAction, StateEngineError, StateValue, WriteRequest};

/// External authorization policy engine.
///
/// Evaluated strictly before any state mutation; the call may block (for
/// example on an external signer) but never observes a partial write. The
/// engine only performs add/edit disambiguation - the configured rule for
/// each action lives behind this port.
pub trait PolicyEngine: Send + Sync {
    fn evaluate(
        &self,
        request: &WriteRequest,
        action: &AuthAction,
    ) -> Result<(), StateEngineError>;
}

/// Collaborator-owned serialization of state values.
///
/// Encoding must be deterministic: the same [`StateValue`] must always
/// produce the same bytes, because the root-hash chain fingerprints the
/// encoded form.
pub trait ValueCodec: Send + Sync {
    fn encode(&self, value: &StateValue) -> Result<Vec<u8>, StateEngineError>;
    fn decode(&self, bytes: &[u8]) -> Result<StateValue, StateEngineError>;
}
