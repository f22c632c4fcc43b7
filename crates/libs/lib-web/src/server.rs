//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads the configuration once, builds the session provider and
//! the market-data SDK handle from it, and serves the router until Ctrl+C/SIGTERM.

// region: --- Imports
use axum::{routing::get, Router};
use lib_auth::{JwtSessionProvider, SessionProvider};
use lib_core::Config;
use lib_moralis::{MarketDataSdk, MoralisConfig, MoralisSdk};
use lib_utils::{get_env, get_env_or};
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionProvider>,
    pub sdk: Arc<dyn MarketDataSdk>,
}

impl AppState {
    /// Build the production collaborators from configuration.
    ///
    /// Nothing is contacted here; the SDK starts on the first page request.
    pub fn from_config(config: &Config) -> Self {
        Self {
            sessions: Arc::new(JwtSessionProvider::new(config.session_secret.clone())),
            sdk: Arc::new(MoralisSdk::new(MoralisConfig::from(config))),
        }
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Read `BIND_ADDRESS` and `ALLOWED_ORIGINS` (comma-separated), keeping defaults for unset values.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_address = get_env_or("BIND_ADDRESS", &defaults.bind_address);
        let allowed_origins = match get_env("ALLOWED_ORIGINS") {
            Ok(origins) => parse_origins(&origins),
            Err(_) => defaults.allowed_origins,
        };

        Self {
            bind_address,
            allowed_origins,
        }
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global tracing subscriber.
///
/// The level comes from `LOG_LEVEL` (`trace`, `debug`, `info`, `warn`, `error`),
/// defaulting to `info`.
pub fn init_tracing() -> anyhow::Result<String> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Initialize and start the HTTP server
///
/// Expects `.env` to be loaded already, since `server_config` is read first.
///
/// # Errors
///
/// This function will return an error if:
/// - The tracing subscriber cannot be installed
/// - Configuration loading or validation fails
/// - Server binding fails
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    let log_level = init_tracing()?;
    info!(" MARKET PAGE SERVER STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;
    info!(config = ?app_config, "Configuration loaded");

    if !app_config.moralis_verify_on_start {
        warn!("MORALIS_VERIFY_ON_START is off - an invalid API key surfaces on first use");
    }

    let state = AppState::from_config(&app_config);
    let app = create_router(state, server_config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;

    info!(" SERVER READY: http://{}", server_config.bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(" Server stopped");
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    use axum::http::{HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true);

    let trace = tower_http::trace::TraceLayer::new_for_http()
        .make_span_with(|request: &axum::http::Request<_>| {
            let request_id = request
                .extensions()
                .get::<RequestStamp>()
                .map(|s| s.id.clone())
                .unwrap_or_else(|| "unknown".to_string());
            tracing::info_span!(
                "http_request",
                request_id = %request_id,
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
            tracing::error!(
                error = ?error,
                latency_ms = latency.as_millis(),
                "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                error,
                latency.as_millis()
            );
        });

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/market", get(handlers::market::market_page))
        .route("/api/pages/market", get(handlers::market::market_page_props))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        // Outermost first: CORS, then request id, then the span and log lines that read it
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum::middleware::from_fn(stamp_req))
                .layer(trace)
                .layer(axum::middleware::from_fn(log_requests)),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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

    info!(" Shutdown signal received");
}

/// Log server information
fn log_server_info() {
    info!(" PAGES:");
    info!("   • GET  /market?width={{px}}&height={{px}}");
    info!("   • GET  /api/pages/market");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_empty() {
        let origins = parse_origins(" http://localhost:3000 ,, https://app.example.com,");
        assert_eq!(
            origins,
            vec!["http://localhost:3000".to_string(), "https://app.example.com".to_string()]
        );
    }

    #[test]
    fn test_from_env_reads_allowed_origins() {
        std::env::set_var("ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com");
        let config = ServerConfig::from_env();
        std::env::remove_var("ALLOWED_ORIGINS");

        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example.com".to_string(), "https://b.example.com".to_string()]
        );
        assert_eq!(ServerConfig::from_env().allowed_origins, ServerConfig::default().allowed_origins);
    }
}
