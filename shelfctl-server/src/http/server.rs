//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Request timeout
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::covers::CoverAggregator;
use crate::db::BookStore;

/// Default request timeout for the whole router
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bulk cover batches must finish inside the request timeout so they answer
/// with placeholders instead of a bare 408.
fn bulk_cover_deadline(request_timeout: Duration) -> Duration {
    request_timeout * 9 / 10
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    pub cors_permissive: bool,

    /// Upper bound on any single request
    pub request_timeout: Duration,

    /// Directory served under /static, if any
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            static_dir: None,
        }
    }
}

/// Shared application state
///
/// Immutable after startup; handlers never write to it.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
    pub covers: CoverAggregator,
    /// ISBNs served by `GET /covers/featured`
    pub featured: Vec<String>,
}

fn local_origins(port: u16) -> AllowOrigin {
    let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| HeaderValue::from_str(&format!("http://{}:{}", host, port)).ok())
        .collect();
    AllowOrigin::list(origins)
}

/// Build the application router with all routes and middleware.
pub fn build_router(mut state: AppState, config: &ServerConfig) -> Router {
    let bulk_deadline = bulk_cover_deadline(config.request_timeout);
    if state.covers.deadline().map_or(true, |d| d > bulk_deadline) {
        state.covers = state.covers.with_deadline(bulk_deadline);
    }

    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(local_origins(config.bind_addr.port()))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors);

    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::books::router())
        .merge(routes::covers::router());

    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "serving static files");
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(middleware).with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let state = AppState { books: Arc::new(PgBookStore::new(pool)), .. };
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
