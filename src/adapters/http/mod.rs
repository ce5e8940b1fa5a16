//! HTTP adapters - REST API implementations.

pub mod form;
pub mod health;
pub mod middleware;
mod router;

pub use form::FormHandlers;
pub use router::{app_router, cors_layer, with_server_layers};
