//! Certificate entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A completion certificate issued once per (student, course).
///
/// Uniqueness is enforced by a database constraint, not an application
/// pre-check, so concurrent generation attempts converge on one row.
/// Certificates are immutable once created and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    /// Unique certificate identifier.
    pub id: Uuid,
    /// The student the certificate was issued to.
    pub student_id: Uuid,
    /// The completed course.
    pub course_id: Uuid,
    /// The course's instructor at issuance time.
    pub instructor_id: Uuid,
    /// Public URL path of the rendered PDF artifact.
    pub file_url: String,
    /// When the certificate was issued.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a newly rendered certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCertificate {
    /// The student the certificate is issued to.
    pub student_id: Uuid,
    /// The completed course.
    pub course_id: Uuid,
    /// The course's instructor.
    pub instructor_id: Uuid,
    /// Public URL path of the rendered PDF artifact.
    pub file_url: String,
}
