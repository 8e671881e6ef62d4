//! # Slotbook API
//!
//! The HTTP boundary of the slot engine: fetch, single-slot mutations, bulk
//! range scheduling, calendar projection and the selection adapter.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into store and editor calls
//! - **Middleware**: Error-to-status mapping
//! - **Config**: Environment configuration
//!
//! Every handler reaches the slot collection through a cloned
//! [`SlotStore`] handle; the store task serializes the actual work.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use slotbook_core::models::schedule::RangeLimits;
use slotbook_store::{SlotEditor, SlotStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: SlotStore,
    pub editor: SlotEditor,
    pub range_limits: RangeLimits,
}

impl ApiState {
    pub fn new(store: SlotStore) -> Self {
        Self::with_limits(store, RangeLimits::default())
    }

    pub fn with_limits(store: SlotStore, range_limits: RangeLimits) -> Self {
        let editor = SlotEditor::new(store.clone());
        Self {
            store,
            editor,
            range_limits,
        }
    }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with all routes and no outer layers.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot management endpoints
        .merge(routes::slots::routes())
        // Calendar display adapter endpoints
        .merge(routes::calendar::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server over an already running store.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use slotbook_api::{config::ApiConfig, start_server};
/// use slotbook_db::memory::InMemorySlotBackend;
/// use slotbook_store::SlotStore;
///
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let store = SlotStore::spawn(Arc::new(InMemorySlotBackend::new()), config.store_config());
/// start_server(config, store).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: SlotStore) -> Result<()> {
    let state = Arc::new(ApiState::with_limits(store, config.range_limits()));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
