//! Application builder — wires repositories, services, router, and state
//! into a running Axum server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use learnhub_core::config::AppConfig;
use learnhub_core::error::AppError;
use learnhub_database::repositories::{
    certificate::CertificateRepository, course::CourseRepository,
    enrollment::EnrollmentRepository, progress::ProgressRepository,
    purchase::PurchaseRepository, user::UserRepository,
};
use learnhub_payment::{EsewaGateway, StripeGateway};
use learnhub_storage::artifact::ArtifactStore;

use crate::router::build_router;
use crate::state::AppState;

/// Build the shared application state from configuration and a pool.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    // Repositories
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let course_repo = Arc::new(CourseRepository::new(db_pool.clone()));
    let purchase_repo = Arc::new(PurchaseRepository::new(db_pool.clone()));
    let enrollment_repo = Arc::new(EnrollmentRepository::new(db_pool.clone()));
    let progress_repo = Arc::new(ProgressRepository::new(db_pool.clone()));
    let certificate_repo = Arc::new(CertificateRepository::new(db_pool.clone()));

    // Auth
    let password_hasher = Arc::new(learnhub_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(learnhub_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(learnhub_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // Gateways and artifact storage
    let stripe = Arc::new(StripeGateway::new(config.payment.stripe.clone()));
    let esewa = Arc::new(EsewaGateway::new(config.payment.esewa.clone()));
    let artifact_store = Arc::new(ArtifactStore::new(&config.certificate.output_dir).await?);

    // Services
    let user_service = Arc::new(learnhub_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&enrollment_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        &config.auth,
    ));
    let catalog_service = Arc::new(learnhub_service::catalog::CatalogService::new(Arc::clone(
        &course_repo,
    )));
    let purchase_service = Arc::new(learnhub_service::purchase::PurchaseService::new(
        Arc::clone(&course_repo),
        Arc::clone(&purchase_repo),
        Arc::clone(&enrollment_repo),
        Arc::clone(&stripe),
        Arc::clone(&esewa),
        config.payment.clone(),
    ));
    let progress_service = Arc::new(learnhub_service::progress::ProgressService::new(
        Arc::clone(&course_repo),
        Arc::clone(&progress_repo),
        Arc::clone(&purchase_repo),
        Arc::clone(&enrollment_repo),
    ));
    let certificate_service = Arc::new(learnhub_service::certificate::CertificateService::new(
        Arc::clone(&certificate_repo),
        Arc::clone(&course_repo),
        Arc::clone(&progress_repo),
        Arc::clone(&user_repo),
        Arc::clone(&artifact_store),
        config.certificate.clone(),
    ));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        artifact_store,
        user_repo,
        course_repo,
        purchase_repo,
        enrollment_repo,
        progress_repo,
        certificate_repo,
        user_service,
        catalog_service,
        purchase_service,
        progress_service,
        certificate_service,
    })
}

/// Build the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Run the LearnHub server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("LearnHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
