//! Member Directory Backend
//!
//! A read-only REST façade over the directory's document store: paginated
//! member listings, single-member lookup, and filter reference lists.

mod api;
mod config;
mod directory;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use directory::Directory;
use store::FirestoreStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Directory,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Member Directory Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize the document store client; a malformed credential fails here
    let store = FirestoreStore::new(&config.service_account_key)?;

    // Create application state
    let state = AppState {
        directory: Directory::new(Arc::new(store)),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

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

    // API routes
    let api_routes = Router::new()
        // Members
        .route("/members", get(api::list_members))
        .route("/members/{id}", get(api::get_member))
        // Filters
        .route("/filters/focuses", get(api::list_focuses))
        .route("/filters/industries", get(api::list_industries))
        .route("/filters/regions", get(api::list_regions));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
