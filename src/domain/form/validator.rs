//! Structural validation of decoded model output.
//!
//! A decoded object is either an irrelevant-prompt signal or a form
//! configuration. The sentinel check runs first, so a signal never fails
//! the `fields`/`submit` checks. Only top-level presence is enforced;
//! field-level shape is left to the consumer.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Member carrying the irrelevant-prompt sentinel.
pub const SENTINEL_FIELD: &str = "error";

/// Value the model emits when the request has nothing to do with forms.
pub const IRRELEVANT_PROMPT_SENTINEL: &str = "IrrelevantPrompt";

pub const FIELDS_KEY: &str = "fields";
pub const SUBMIT_KEY: &str = "submit";

const MESSAGE_KEY: &str = "message";

static NULL: Value = Value::Null;

/// A decoded object missing a required top-level member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing fields")]
    MissingFields,

    #[error("missing submit")]
    MissingSubmit,
}

impl SchemaError {
    /// Name of the missing member.
    pub fn member(&self) -> &'static str {
        match self {
            SchemaError::MissingFields => FIELDS_KEY,
            SchemaError::MissingSubmit => SUBMIT_KEY,
        }
    }
}

/// Form configuration that carries both `fields` and `submit`.
///
/// Serializes as the original object, unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormConfig(Map<String, Value>);

impl FormConfig {
    /// The `fields` member, in whatever shape the model produced.
    pub fn fields(&self) -> &Value {
        self.0.get(FIELDS_KEY).unwrap_or(&NULL)
    }

    /// The `submit` member, in whatever shape the model produced.
    pub fn submit(&self) -> &Value {
        self.0.get(SUBMIT_KEY).unwrap_or(&NULL)
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// The model judged the request unrelated to form creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IrrelevantPromptSignal(Map<String, Value>);

impl IrrelevantPromptSignal {
    /// Explanation supplied by the model, if any.
    pub fn message(&self) -> Option<&str> {
        self.0.get(MESSAGE_KEY).and_then(Value::as_str)
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// The two valid results of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Form(FormConfig),
    Irrelevant(IrrelevantPromptSignal),
}

impl GenerationOutcome {
    pub fn is_form(&self) -> bool {
        matches!(self, GenerationOutcome::Form(_))
    }
}

/// Classifies a decoded object.
///
/// 1. `error == "IrrelevantPrompt"` → [`GenerationOutcome::Irrelevant`]
/// 2. no `fields` → [`SchemaError::MissingFields`]
/// 3. no `submit` → [`SchemaError::MissingSubmit`]
/// 4. otherwise → [`GenerationOutcome::Form`] holding the object unchanged
pub fn validate(object: Map<String, Value>) -> Result<GenerationOutcome, SchemaError> {
    if is_irrelevant_signal(&object) {
        return Ok(GenerationOutcome::Irrelevant(IrrelevantPromptSignal(object)));
    }

    if !object.contains_key(FIELDS_KEY) {
        return Err(SchemaError::MissingFields);
    }
    if !object.contains_key(SUBMIT_KEY) {
        return Err(SchemaError::MissingSubmit);
    }

    Ok(GenerationOutcome::Form(FormConfig(object)))
}

fn is_irrelevant_signal(object: &Map<String, Value>) -> bool {
    object.get(SENTINEL_FIELD).and_then(Value::as_str) == Some(IRRELEVANT_PROMPT_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn sentinel_yields_irrelevant_signal() {
        let outcome = validate(object(json!({
            "error": "IrrelevantPrompt",
            "message": "Please describe a form."
        })))
        .unwrap();

        match outcome {
            GenerationOutcome::Irrelevant(signal) => {
                assert_eq!(signal.message(), Some("Please describe a form."));
            }
            other => panic!("expected irrelevant signal, got {other:?}"),
        }
    }

    #[test]
    fn sentinel_takes_precedence_over_required_members() {
        let outcome = validate(object(json!({
            "error": "IrrelevantPrompt",
            "fields": [],
            "submit": {}
        })))
        .unwrap();
        assert!(!outcome.is_form());
    }

    #[test]
    fn signal_without_message_is_still_a_signal() {
        let outcome = validate(object(json!({ "error": "IrrelevantPrompt" }))).unwrap();
        match outcome {
            GenerationOutcome::Irrelevant(signal) => assert_eq!(signal.message(), None),
            other => panic!("expected irrelevant signal, got {other:?}"),
        }
    }

    #[test]
    fn other_error_values_are_not_the_sentinel() {
        let err = validate(object(json!({ "error": "irrelevantprompt" }))).unwrap_err();
        assert_eq!(err, SchemaError::MissingFields);

        let err = validate(object(json!({ "error": ["IrrelevantPrompt"] }))).unwrap_err();
        assert_eq!(err, SchemaError::MissingFields);
    }

    #[test]
    fn missing_fields_is_a_schema_error() {
        let err = validate(object(json!({ "submit": {} }))).unwrap_err();
        assert_eq!(err, SchemaError::MissingFields);
        assert_eq!(err.to_string(), "missing fields");
    }

    #[test]
    fn missing_submit_is_a_schema_error() {
        let err = validate(object(json!({ "fields": [] }))).unwrap_err();
        assert_eq!(err, SchemaError::MissingSubmit);
        assert_eq!(err.to_string(), "missing submit");
        assert_eq!(err.member(), "submit");
    }

    #[test]
    fn valid_config_is_returned_unchanged() {
        let input = json!({
            "fields": [{ "name": "email" }],
            "submit": { "label": "Send" }
        });

        let outcome = validate(object(input.clone())).unwrap();
        match outcome {
            GenerationOutcome::Form(config) => {
                assert_eq!(config.fields(), &json!([{ "name": "email" }]));
                assert_eq!(config.submit(), &json!({ "label": "Send" }));
                assert_eq!(serde_json::to_value(&config).unwrap(), input);
            }
            other => panic!("expected form, got {other:?}"),
        }
    }

    #[test]
    fn required_members_may_have_any_shape() {
        let outcome = validate(object(json!({ "fields": null, "submit": "Go" }))).unwrap();
        assert!(outcome.is_form());
    }

    #[test]
    fn extra_members_are_preserved() {
        let input = json!({
            "title": "Contact Us",
            "endpoint": "/api/contact",
            "fields": [],
            "submit": { "label": "Send" },
            "steps": [{ "id": "one", "fields": [] }]
        });

        match validate(object(input.clone())).unwrap() {
            GenerationOutcome::Form(config) => {
                assert_eq!(Value::Object(config.into_inner()), input);
            }
            other => panic!("expected form, got {other:?}"),
        }
    }
}
