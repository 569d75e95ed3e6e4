//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use learnhub_auth::jwt::decoder::JwtDecoder;
use learnhub_auth::jwt::encoder::JwtEncoder;
use learnhub_auth::password::PasswordHasher;
use learnhub_core::config::AppConfig;
use learnhub_storage::artifact::ArtifactStore;

use learnhub_database::repositories::certificate::CertificateRepository;
use learnhub_database::repositories::course::CourseRepository;
use learnhub_database::repositories::enrollment::EnrollmentRepository;
use learnhub_database::repositories::progress::ProgressRepository;
use learnhub_database::repositories::purchase::PurchaseRepository;
use learnhub_database::repositories::user::UserRepository;

use learnhub_service::catalog::CatalogService;
use learnhub_service::certificate::CertificateService;
use learnhub_service::progress::ProgressService;
use learnhub_service::purchase::PurchaseService;
use learnhub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Certificate artifact store
    pub artifact_store: Arc<ArtifactStore>,

    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Course repository
    pub course_repo: Arc<CourseRepository>,
    /// Purchase repository
    pub purchase_repo: Arc<PurchaseRepository>,
    /// Enrollment repository
    pub enrollment_repo: Arc<EnrollmentRepository>,
    /// Progress repository
    pub progress_repo: Arc<ProgressRepository>,
    /// Certificate repository
    pub certificate_repo: Arc<CertificateRepository>,

    /// Account service
    pub user_service: Arc<UserService>,
    /// Catalog service
    pub catalog_service: Arc<CatalogService>,
    /// Purchase orchestration service
    pub purchase_service: Arc<PurchaseService>,
    /// Progress tracking service
    pub progress_service: Arc<ProgressService>,
    /// Certificate issuance service
    pub certificate_service: Arc<CertificateService>,
}
