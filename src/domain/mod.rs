//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, auth, state machines)
//! - `form` - Form generation pipeline: prompt, extraction, sanitizing, decoding, validation

pub mod form;
pub mod foundation;
