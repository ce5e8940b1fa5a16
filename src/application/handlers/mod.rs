//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod form;

pub use form::{GenerateFormCommand, GenerateFormHandler};
