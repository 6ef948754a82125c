use serde_json::{Map, Value};

use crate::dto::{ValidationResponse, INFO_MISSING_FIELDS, INFO_SUCCESS, INFO_UNRESOLVABLE};
use crate::errors::{Result, XsdError};
use crate::xsd::{self, ReferencePolicy};

/// The `data` and `schema` members of a request body, still untyped.
#[derive(Debug, Clone)]
pub struct RequestFields {
    data: Value,
    schema: Value,
}

impl RequestFields {
    pub fn new(data: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            data: Value::String(data.into()),
            schema: Value::String(schema.into()),
        }
    }

    /// Pull both fields out of a raw body.
    ///
    /// Returns `None` when the body is empty, is not JSON, is not an object,
    /// or lacks either key. The caller answers all of those the same way.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let payload: Map<String, Value> = match serde_json::from_slice(body) {
            Ok(Value::Object(map)) => map,
            _ => return None,
        };
        Self::from_payload(payload)
    }

    pub fn from_payload(mut payload: Map<String, Value>) -> Option<Self> {
        let data = payload.remove("data")?;
        let schema = payload.remove("schema")?;
        Some(Self { data, schema })
    }

    /// Resolve both fields and run the engine.
    pub fn validate(&self, references: &ReferencePolicy) -> Result<bool> {
        let data = self.data.as_str().ok_or(XsdError::FieldType("data"))?;
        let schema = self.schema.as_str().ok_or(XsdError::FieldType("schema"))?;

        let schema = references.resolve(schema)?;
        let data = references.resolve(data)?;
        xsd::validate(&data, &schema, references)
    }
}

/// What a single request amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The engine reached a verdict
    Validated(bool),
    /// Body unusable or a required field absent
    MissingFields,
    /// Fields present but no verdict could be reached
    Unresolvable(XsdError),
}

impl Outcome {
    /// Evaluate a raw request body end to end.
    pub fn evaluate(body: &[u8], references: &ReferencePolicy) -> Self {
        match RequestFields::from_body(body) {
            None => Outcome::MissingFields,
            Some(fields) => Self::from_result(fields.validate(references)),
        }
    }

    pub fn from_result(result: Result<bool>) -> Self {
        match result {
            Ok(valid) => Outcome::Validated(valid),
            Err(
                e @ (XsdError::SchemaParse(_)
                | XsdError::DocumentParse(_)
                | XsdError::Reference(_)
                | XsdError::FieldType(_)),
            ) => Outcome::Unresolvable(e),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Validated(_) => 200,
            Outcome::MissingFields | Outcome::Unresolvable(_) => 400,
        }
    }

    pub fn to_response(&self) -> ValidationResponse {
        match self {
            Outcome::Validated(valid) => ValidationResponse::new(*valid, INFO_SUCCESS),
            Outcome::MissingFields => ValidationResponse::new(false, INFO_MISSING_FIELDS),
            Outcome::Unresolvable(_) => ValidationResponse::new(false, INFO_UNRESOLVABLE),
        }
    }
}
