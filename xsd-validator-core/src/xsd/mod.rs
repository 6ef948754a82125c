//! XSD Implementation
//!
//! - Source resolution, inline text or file references (source)
//! - Schema compilation and document conformance (validator)
//!
//! libxml2 does the actual schema work. Nothing compiled here outlives the
//! call that built it.

mod source;
mod validator;

pub use source::{ReferencePolicy, XmlSource};
pub use validator::XsdValidator;

use crate::errors::Result;

/// Compile `schema` and report whether `data` conforms to it.
///
/// `references` also governs the files the schema pulls in through
/// include, import and redefine.
pub fn validate(
    data: &XmlSource<'_>,
    schema: &XmlSource<'_>,
    references: &ReferencePolicy,
) -> Result<bool> {
    let mut validator = XsdValidator::compile(schema, references)?;
    validator.is_valid(data)
}
