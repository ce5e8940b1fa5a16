//! Top-level router assembly and server-wide layers.

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::form::{form_routes, FormHandlers};
use super::health::ping;
use super::middleware::{auth_middleware, AuthState};

/// Builds the application router.
///
/// # Routes
///
/// - `GET /ping` - Public liveness check
/// - `POST /api/chat` - Form generation (requires a Bearer token)
pub fn app_router(form: FormHandlers, auth: AuthState) -> Router {
    let api = form_routes(form).layer(middleware::from_fn_with_state(auth, auth_middleware));

    Router::new().route("/ping", get(ping)).nest("/api", api)
}

/// Wraps `router` in request-id, tracing, timeout and CORS layers.
pub fn with_server_layers(router: Router, request_timeout: Duration, cors: CorsLayer) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(cors),
    )
}

/// Builds the CORS layer for the browser front-end.
///
/// With no configured origins, any origin is allowed when `allow_any_when_empty`
/// is set and none otherwise.
pub fn cors_layer(origins: &[String], allow_any_when_empty: bool) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        if allow_any_when_empty {
            tracing::info!("CORS: allowing all origins");
            return cors.allow_origin(Any);
        }
        tracing::warn!("CORS: no origins configured, cross-origin requests will be refused");
        return cors;
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "CORS: ignoring invalid origin");
                None
            }
        })
        .collect();

    tracing::info!("CORS: allowing origins: {:?}", origins);
    cors.allow_origin(allowed)
}
