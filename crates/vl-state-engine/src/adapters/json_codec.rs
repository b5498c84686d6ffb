use crate::domain::{StateEngineError, StateValue};
use crate::ports::ValueCodec;

/// JSON implementation of the state value codec.
///
/// Object keys serialize in sorted order, so encoding the same value always
/// yields the same bytes - the determinism the root-hash chain requires.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonValueCodec;

impl ValueCodec for JsonValueCodec {
    fn encode(&self, value: &StateValue) -> Result<Vec<u8>, StateEngineError> {
        serde_json::to_vec(value).map_err(|e| StateEngineError::Codec(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<StateValue, StateEngineError> {
        serde_json::from_slice(bytes).map_err(|e| StateEngineError::Codec(e.to_string()))
    }
}
