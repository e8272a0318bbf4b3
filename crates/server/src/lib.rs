//! WebSocket chat server with observability for the ordering bot.
//!
//! Serves the chat endpoint, a read-only view of placed orders, static
//! client files, structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod wire;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use dialogue::ConversationHub;
use metrics_exporter_prometheus::PrometheusHandle;
use ordering::{Catalog, Ledger};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::Config;
use error::ServerError;
use routes::metrics::MetricsState;

const SESSION_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub hub: ConversationHub,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    static_dir: impl AsRef<Path>,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(MetricsState {
            handle: metrics_handle,
            app: state.clone(),
        });

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/ws", get(routes::chat::upgrade))
        .route("/orders", get(routes::orders::list))
        .route("/orders/{number}", get(routes::orders::get))
        .with_state(state)
        .merge(metrics_router)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state: catalog, ledger and conversation hub.
pub fn create_state(config: &Config) -> Result<Arc<AppState>, ServerError> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::standard(),
    };

    let hub = ConversationHub::new(Arc::new(catalog), Ledger::new(), config.hub_config());
    Ok(Arc::new(AppState { hub }))
}

/// Periodically evicts idle session carts until the runtime shuts down.
pub fn spawn_session_pruner(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PRUNE_INTERVAL);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            state.hub.prune_sessions();
        }
    })
}

/// Binds the listener and serves until `shutdown` resolves.
pub async fn run(
    config: Config,
    metrics_handle: PrometheusHandle,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let state = create_state(&config)?;
    let pruner = spawn_session_pruner(state.clone());
    let app = create_app(state, metrics_handle, &config.static_dir);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(%addr, static_dir = %config.static_dir.display(), "starting chat server");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve);
    pruner.abort();
    served
}
