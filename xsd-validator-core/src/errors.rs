use thiserror::Error;

pub type Result<T> = std::result::Result<T, XsdError>;

/// Failures that prevent a verdict from being reached.
///
/// A document that parses but does not conform to its schema is not an error,
/// it is a `false` verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XsdError {
    #[error("schema could not be compiled: {0}")]
    SchemaParse(String),

    #[error("document could not be parsed: {0}")]
    DocumentParse(String),

    #[error("reference could not be resolved: {0}")]
    Reference(String),

    #[error("field '{0}' is not a string")]
    FieldType(&'static str),
}
