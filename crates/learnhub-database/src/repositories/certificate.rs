//! Certificate repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use learnhub_core::error::{AppError, ErrorKind};
use learnhub_core::result::AppResult;
use learnhub_entity::certificate::{Certificate, CreateCertificate};

/// Repository for issued certificates.
#[derive(Debug, Clone)]
pub struct CertificateRepository {
    pool: PgPool,
}

impl CertificateRepository {
    /// Create a new certificate repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the certificate for a (student, course) pair.
    pub async fn find(&self, student_id: Uuid, course_id: Uuid) -> AppResult<Option<Certificate>> {
        sqlx::query_as::<_, Certificate>(
            "SELECT * FROM certificates WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find certificate", e))
    }

    /// Insert a certificate row. Returns `None` when another request won
    /// the (student, course) uniqueness race; the caller should re-read
    /// the winning row and discard its own artifact.
    pub async fn create(&self, data: &CreateCertificate) -> AppResult<Option<Certificate>> {
        sqlx::query_as::<_, Certificate>(
            "INSERT INTO certificates (student_id, course_id, instructor_id, file_url) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (student_id, course_id) DO NOTHING RETURNING *",
        )
        .bind(data.student_id)
        .bind(data.course_id)
        .bind(data.instructor_id)
        .bind(&data.file_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create certificate", e))
    }
}
