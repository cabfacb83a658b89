// Library exports for binary tools and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use services::{announcements::AnnouncementService, credentials::CredentialGate};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub announcements: AnnouncementService,
    pub credentials: CredentialGate,
}

/// All routes, with request tracing. CORS is layered on by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .route(
            "/announcements",
            get(routes::announcements::list_active).post(routes::announcements::create_announcement),
        )
        .route("/announcements/all", get(routes::announcements::list_all))
        .route(
            "/announcements/{id}",
            put(routes::announcements::update_announcement)
                .delete(routes::announcements::delete_announcement),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
