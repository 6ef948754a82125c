//! XSD-Validator-Client
//!
//! Calls a deployed xsd-validator function from message pipelines that
//! delegate XML validation over HTTP.

mod client;
pub use client::{ValidationClient, ValidationClientBuilder};

pub mod errors;
pub use errors::ClientError;
