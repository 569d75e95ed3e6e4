//! Route definitions for the LearnHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! Generated certificate PDFs are served statically from the artifact
//! directory under the configured public prefix.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(course_routes())
        .merge(purchase_routes())
        .merge(progress_routes())
        .merge(certificate_routes())
        .merge(health_routes());

    let certificate_files = ServeDir::new(&state.config.certificate.output_dir);
    let public_prefix = state.config.certificate.public_prefix.clone();

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .nest_service(&public_prefix, certificate_files)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(middleware::compression::build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, me, profile, enrollments
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/me", put(handlers::auth::update_profile))
        .route("/auth/me/courses", get(handlers::auth::enrolled_courses))
}

/// Catalog reads and instructor authoring
fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(handlers::course::list_courses))
        .route("/courses", post(handlers::course::create_course))
        .route("/courses/{id}", get(handlers::course::get_course))
        .route("/courses/{id}/status", get(handlers::course::course_status))
        .route("/courses/{id}/lectures", post(handlers::course::add_lecture))
        .route(
            "/courses/{id}/publish",
            put(handlers::course::publish_course),
        )
}

/// Checkout and the two confirmation paths
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/purchase", get(handlers::purchase::list_purchases))
        .route("/purchase/checkout", post(handlers::purchase::checkout))
        .route(
            "/purchase/webhook/stripe",
            post(handlers::purchase::stripe_webhook),
        )
        .route(
            "/purchase/verify/esewa",
            get(handlers::purchase::esewa_verify),
        )
}

/// Lecture-level progress tracking
fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(handlers::progress::list_progress))
        .route("/progress/{course_id}", get(handlers::progress::get_progress))
        .route(
            "/progress/{course_id}/lectures/{lecture_id}/view",
            post(handlers::progress::view_lecture),
        )
        .route(
            "/progress/{course_id}/complete",
            put(handlers::progress::mark_completed),
        )
        .route(
            "/progress/{course_id}/incomplete",
            put(handlers::progress::mark_incompleted),
        )
}

/// Certificate issuance and retrieval
fn certificate_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/certificates/{course_id}",
            get(handlers::certificate::fetch),
        )
        .route(
            "/certificates/{course_id}",
            post(handlers::certificate::generate),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
