//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generative backends (Gemini, mock)
//! - `auth` - Session validators (HS256 JWT, mock)
//! - `http` - axum REST API

pub mod ai;
pub mod auth;
pub mod http;
