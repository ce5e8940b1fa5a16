//! BetterForm API server entry point
//!
//! Loads configuration, wires the Gemini backend and session validator into
//! the form generation handler, and serves the HTTP API until Ctrl-C or
//! SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use betterform::adapters::ai::{GeminiBackend, GeminiConfig};
use betterform::adapters::auth::{JwtConfig, JwtSessionValidator};
use betterform::adapters::http::middleware::AuthState;
use betterform::adapters::http::{app_router, cors_layer, with_server_layers, FormHandlers};
use betterform::application::handlers::form::GenerateFormHandler;
use betterform::config::{AppConfig, Environment, ValidationError};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server terminated");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let AppConfig {
        server,
        gemini,
        auth,
    } = config;

    let api_key = gemini
        .api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("GEMINI_API_KEY"))?;
    let backend = GeminiBackend::new(
        GeminiConfig::from_secret(api_key)
            .with_model(gemini.model.clone())
            .with_base_url(gemini.base_url.clone())
            .with_timeout(gemini.timeout()),
    )?;
    tracing::info!(model = %gemini.model, "Gemini backend configured");

    let jwt_secret = auth
        .jwt_secret
        .ok_or(ValidationError::MissingRequired("JWT_SECRET"))?;
    let mut jwt_config = JwtConfig::new(jwt_secret);
    if let Some(issuer) = auth.issuer {
        jwt_config = jwt_config.with_issuer(issuer);
    }
    if let Some(audience) = auth.audience {
        jwt_config = jwt_config.with_audience(audience);
    }
    let validator: AuthState = Arc::new(JwtSessionValidator::new(jwt_config));

    let handler = GenerateFormHandler::new(Arc::new(backend))
        .with_timeout(gemini.backend_deadline());

    let cors = cors_layer(
        &server.cors_origins_list(),
        server.environment == Environment::Development,
    );
    let app = with_server_layers(
        app_router(FormHandlers::new(Arc::new(handler)), validator),
        server.request_timeout(),
        cors,
    );

    let addr = server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?server.environment, "BetterForm API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
