//! XSD-Validator
//!
//! The HTTP validation function and the local `check` command.

pub mod check;
pub mod server;
