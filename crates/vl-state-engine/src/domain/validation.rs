//! # Payload Validation
//!
//! Static, per-record-kind validation of request payloads.
//!
//! Validation never touches the state store. A request that fails here
//! mutates nothing, so no rollback path exists or is needed.
//!
//! Two stages run for every kind:
//!
//! 1. **Shape check**: `name`, `version` and the body must be present and
//!    non-empty.
//! 2. **Content check**: kind-specific. The shipped [`ContextValidator`]
//!    checks JSON-LD documents; [`SchemaValidator`] checks attribute schemas.

use super::{RecordKind, RequestData, StateEngineError};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Generic URI grammar: `scheme ":" [ "//" authority ] path [ "?" query ]
/// [ "#" fragment ]`, anchored over the whole input.
const URI_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*:(//[^/?#]*)?[^?#]*(\?[^#]*)?(#.*)?$";

static URI_REGEX: OnceLock<Regex> = OnceLock::new();

fn uri_regex() -> &'static Regex {
    URI_REGEX.get_or_init(|| Regex::new(URI_PATTERN).expect("static URI pattern compiles"))
}

/// Pluggable structural/semantic validation for one record kind.
pub trait PayloadValidator: Send + Sync {
    fn validate(&self, data: &RequestData) -> Result<(), StateEngineError>;
}

/// Shape check shared by every kind: name, version and body present and
/// non-empty.
pub fn validate_shape(data: &RequestData) -> Result<(), StateEngineError> {
    if data.name.is_empty() {
        return Err(StateEngineError::PayloadValidation("missing name".into()));
    }
    if data.version.is_empty() {
        return Err(StateEngineError::PayloadValidation(
            "missing version".into(),
        ));
    }
    if body_is_empty(&data.body) {
        return Err(StateEngineError::PayloadValidation("missing body".into()));
    }
    Ok(())
}

fn body_is_empty(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn check_uri(value: &str) -> Result<(), StateEngineError> {
    if !uri_regex().is_match(value) {
        return Err(StateEngineError::PayloadValidation(format!(
            "malformed uri: {value}"
        )));
    }
    Ok(())
}

/// Validator for JSON-LD context documents.
///
/// The body must be an object carrying an `@context` anchor that is a URI
/// string, a list of URIs/embedded objects, or an embedded object. Every
/// literal URI must satisfy the generic URI grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContextValidator;

/// Anchor field recognized by [`ContextValidator`].
pub const CONTEXT_ANCHOR: &str = "@context";

impl PayloadValidator for ContextValidator {
    fn validate(&self, data: &RequestData) -> Result<(), StateEngineError> {
        validate_shape(data)?;

        let object = data.body.as_object().ok_or_else(|| {
            StateEngineError::PayloadValidation("body must be an object".into())
        })?;
        let anchor = object.get(CONTEXT_ANCHOR).ok_or_else(|| {
            StateEngineError::PayloadValidation("missing anchor field".into())
        })?;

        match anchor {
            Value::String(uri) => check_uri(uri),
            Value::Object(_) => Ok(()),
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(uri) => check_uri(uri)?,
                        Value::Object(_) => {}
                        _ => {
                            return Err(StateEngineError::PayloadValidation(
                                "anchor must be uri, list, or object".into(),
                            ))
                        }
                    }
                }
                Ok(())
            }
            _ => Err(StateEngineError::PayloadValidation(
                "anchor must be uri, list, or object".into(),
            )),
        }
    }
}

/// Validator for attribute schema documents.
///
/// The body must be an object with a non-empty `attr_names` list of strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaValidator;

impl PayloadValidator for SchemaValidator {
    fn validate(&self, data: &RequestData) -> Result<(), StateEngineError> {
        validate_shape(data)?;

        let object = data.body.as_object().ok_or_else(|| {
            StateEngineError::PayloadValidation("body must be an object".into())
        })?;
        let attrs = object.get("attr_names").ok_or_else(|| {
            StateEngineError::PayloadValidation("missing attr_names".into())
        })?;
        match attrs.as_array() {
            Some(names) if !names.is_empty() && names.iter().all(Value::is_string) => Ok(()),
            _ => Err(StateEngineError::PayloadValidation(
                "attr_names must be a non-empty list of strings".into(),
            )),
        }
    }
}

/// Maps each record kind to its payload validator.
pub struct ValidatorRegistry {
    validators: HashMap<RecordKind, Box<dyn PayloadValidator>>,
}

impl ValidatorRegistry {
    /// Empty registry; every kind is unroutable until registered.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Registry with the shipped validators installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RecordKind::JsonLdContext, Box::new(ContextValidator));
        registry.register(RecordKind::Schema, Box::new(SchemaValidator));
        registry
    }

    pub fn register(&mut self, kind: RecordKind, validator: Box<dyn PayloadValidator>) {
        self.validators.insert(kind, validator);
    }

    pub fn get(&self, kind: RecordKind) -> Option<&dyn PayloadValidator> {
        self.validators.get(&kind).map(|v| v.as_ref())
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
