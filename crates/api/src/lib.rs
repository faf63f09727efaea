//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook appointment
//! service. It exposes workers, their free slots, appointment booking and
//! lifecycle, time tracking, reports and user accounts over JSON.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into calls on the booking service and record store
//! - **Middleware**: Provide cross-cutting concerns like authentication and error handling
//! - **Config**: Handle environment and application configuration
//!
//! Storage is abstracted behind [`RecordStore`], so the same router serves
//! the in-memory store and PostgreSQL.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use eyre::Result;
use slotbook_core::{booking::BookingService, slots::SlotEngine, store::RecordStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use slotbook_api::ApiState;
/// use slotbook_core::slots::SlotEngine;
/// use slotbook_db::memory::MemoryStore;
///
/// let state = ApiState::new(Arc::new(MemoryStore::new()), SlotEngine::default());
/// let app = slotbook_api::build_router(Arc::new(state));
/// ```
pub struct ApiState {
    /// Record store shared by every handler
    pub store: Arc<dyn RecordStore>,
    /// Slot listing and booking logic over the same store
    pub bookings: BookingService,
}

impl ApiState {
    pub fn new(store: Arc<dyn RecordStore>, engine: SlotEngine) -> Self {
        let bookings = BookingService::new(store.clone(), engine);
        Self { store, bookings }
    }
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Registration and login
        .merge(routes::auth::routes())
        // Role management
        .merge(routes::users::routes())
        // Worker records and their free slots
        .merge(routes::workers::routes())
        // Appointment booking and lifecycle
        .merge(routes::appointments::routes())
        // Time tracking
        .merge(routes::time_entries::routes())
        // Reports
        .merge(routes::reports::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and record store
///
/// This function initializes logging, creates the bootstrap admin if one is
/// configured, configures routes and starts the HTTP server.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `store` - Record store backing every handler
///
/// # Returns
///
/// * `Result<()>` - Success or error result
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn RecordStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let engine = SlotEngine::new(config.slot_minutes)?;
    let state = Arc::new(ApiState::new(store, engine));

    if let Some(admin) = &config.admin {
        handlers::auth::ensure_admin(state.store.as_ref(), admin).await?;
    }

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
                HeaderName::from_static(middleware::auth::USER_ID_HEADER),
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(slot_minutes = config.slot_minutes, "Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
