use serde::{Deserialize, Serialize};

/// Info message returned whenever the engine reached a verdict.
pub const INFO_SUCCESS: &str = "successful validation";

/// Info message for bodies that are not JSON or lack one of the required fields.
pub const INFO_MISSING_FIELDS: &str = "invalid request, needs 'data' and 'schema' fields.";

/// Info message for requests whose fields could not be turned into a verdict.
pub const INFO_UNRESOLVABLE: &str =
    "invalid json body content, can't resolve 'data' and 'schema' fields.";

/// Info message for failures that are not the caller's fault.
pub const INFO_INTERNAL: &str = "internal error";

/// Body sent to the validation function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub data: String,
    pub schema: String,
}

/// Body returned by the validation function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub validation: bool,
    pub info: String,
}

impl ValidationResponse {
    pub fn new(validation: bool, info: impl Into<String>) -> Self {
        Self {
            validation,
            info: info.into(),
        }
    }
}
