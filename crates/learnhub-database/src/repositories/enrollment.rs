//! Enrollment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use learnhub_core::error::{AppError, ErrorKind};
use learnhub_core::result::AppResult;
use learnhub_entity::course::Course;
use learnhub_entity::user::User;

/// Repository for the user-course enrollment relation.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add an enrollment. Idempotent set-add: inserting an existing pair
    /// is a no-op, so duplicate confirmation deliveries are harmless.
    pub async fn add(&self, user_id: Uuid, course_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add enrollment", e))?;
        Ok(())
    }

    /// Check whether a user is enrolled in a course.
    pub async fn exists(&self, user_id: Uuid, course_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check enrollment", e))
    }

    /// List the courses a user is enrolled in.
    pub async fn courses_for_user(&self, user_id: Uuid) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>(
            "SELECT c.* FROM courses c \
             JOIN enrollments e ON e.course_id = c.id \
             WHERE e.user_id = $1 ORDER BY e.enrolled_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list enrolled courses", e)
        })
    }

    /// List the students enrolled in a course.
    pub async fn students_for_course(&self, course_id: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u \
             JOIN enrollments e ON e.user_id = u.id \
             WHERE e.course_id = $1 ORDER BY e.enrolled_at DESC",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list enrolled students", e)
        })
    }
}
