//! GreenLens Backend
//!
//! Classifies uploaded waste photos, credits eco points and CO2 savings to the
//! user, and keeps a leaderboard, all persisted as one small document.

mod api;
mod classifier;
mod config;
mod db;
mod errors;
mod models;
mod uploads;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use classifier::{Classifier, CommandClassifier, UnconfiguredClassifier};
use config::{Config, StoreBackend};
use db::DocumentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub classifier: Arc<dyn Classifier>,
    pub config: Arc<Config>,
    /// Held for the whole load-modify-save cycle of a scan
    pub scan_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        classifier: Arc<dyn Classifier>,
        config: Config,
    ) -> Self {
        Self {
            store,
            classifier,
            config: Arc::new(config),
            scan_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GreenLens Backend");
    tracing::info!("Store backend: {}", config.store_backend);
    match config.store_backend {
        StoreBackend::Json => tracing::info!("Data file: {:?}", config.data_file),
        StoreBackend::Sqlite => tracing::info!("Database path: {:?}", config.db_path),
        StoreBackend::Memory => tracing::warn!("Memory store: state is lost on restart"),
    }
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize store
    let store = db::open_store(&config).await?;

    // Initialize classifier
    let classifier: Arc<dyn Classifier> = match config.model_command.as_deref() {
        Some(command) => {
            tracing::info!("Model command: {}", command);
            Arc::new(CommandClassifier::new(command, config.model_timeout)?)
        }
        None => {
            tracing::warn!(
                "No model command configured (GREENLENS_MODEL_COMMAND). Every scan will fail!"
            );
            Arc::new(UnconfiguredClassifier)
        }
    };

    let bind_addr = config.bind_addr;
    let state = AppState::new(store, classifier, config);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    // API routes
    let api_routes = Router::new()
        .route("/scan", post(api::scan_item).layer(upload_limit))
        .route("/user", get(api::get_user))
        .route("/leaderboard", get(api::get_leaderboard));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
