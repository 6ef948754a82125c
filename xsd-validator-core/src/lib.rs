//! XSD-Validator-Core
//!
//! Wire types, the XSD engine and the request evaluation shared by the
//! validation function and its client.

pub mod dto;
pub mod errors;

mod request;
pub use request::{Outcome, RequestFields};

pub mod xsd;
pub use xsd::{validate, ReferencePolicy, XmlSource};
