//! BetterForm - Natural-language form generation backend
//!
//! Turns a plain-language description of a web form into a validated
//! form-configuration object by prompting a generative backend and
//! normalizing its loosely-structured reply.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
