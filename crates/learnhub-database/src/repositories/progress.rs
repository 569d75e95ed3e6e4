//! Course progress repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use learnhub_core::error::{AppError, ErrorKind};
use learnhub_core::result::AppResult;
use learnhub_entity::progress::{CourseProgress, LectureProgress};

/// Repository for progress documents and their lecture entries.
#[derive(Debug, Clone)]
pub struct ProgressRepository {
    pool: PgPool,
}

impl ProgressRepository {
    /// Create a new progress repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the progress document for a (user, course) pair.
    pub async fn find(&self, user_id: Uuid, course_id: Uuid) -> AppResult<Option<CourseProgress>> {
        sqlx::query_as::<_, CourseProgress>(
            "SELECT * FROM course_progress WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find progress", e))
    }

    /// Create an empty progress document for the pair. Concurrent creation
    /// converges on the existing row via the unique pair constraint.
    pub async fn create(&self, user_id: Uuid, course_id: Uuid) -> AppResult<CourseProgress> {
        if let Some(existing) = sqlx::query_as::<_, CourseProgress>(
            "INSERT INTO course_progress (user_id, course_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, course_id) DO NOTHING RETURNING *",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create progress", e))?
        {
            return Ok(existing);
        }

        // Lost the insert race; the winner's row is authoritative.
        self.find(user_id, course_id).await?.ok_or_else(|| {
            AppError::database("Progress row missing after conflicting insert")
        })
    }

    /// List the lecture entries of a progress document.
    pub async fn lecture_entries(&self, progress_id: Uuid) -> AppResult<Vec<LectureProgress>> {
        sqlx::query_as::<_, LectureProgress>(
            "SELECT progress_id, lecture_id, viewed FROM lecture_progress WHERE progress_id = $1",
        )
        .bind(progress_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list lecture progress", e)
        })
    }

    /// Upsert the viewed flag for a single lecture.
    pub async fn upsert_lecture(
        &self,
        progress_id: Uuid,
        lecture_id: Uuid,
        viewed: bool,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO lecture_progress (progress_id, lecture_id, viewed) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (progress_id, lecture_id) DO UPDATE SET viewed = EXCLUDED.viewed",
        )
        .bind(progress_id)
        .bind(lecture_id)
        .bind(viewed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert lecture progress", e)
        })?;
        Ok(())
    }

    /// Bulk-set the viewed flag for every given lecture (manual override).
    pub async fn set_all_lectures(
        &self,
        progress_id: Uuid,
        lecture_ids: &[Uuid],
        viewed: bool,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO lecture_progress (progress_id, lecture_id, viewed) \
             SELECT $1, id, $3 FROM UNNEST($2::UUID[]) AS id \
             ON CONFLICT (progress_id, lecture_id) DO UPDATE SET viewed = EXCLUDED.viewed",
        )
        .bind(progress_id)
        .bind(lecture_ids)
        .bind(viewed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bulk-set lecture progress", e)
        })?;
        Ok(())
    }

    /// Store the recomputed completion state.
    pub async fn set_completed(
        &self,
        progress_id: Uuid,
        completed: bool,
        completed_at: Option<DateTime<Utc>>,
    ) -> AppResult<CourseProgress> {
        sqlx::query_as::<_, CourseProgress>(
            "UPDATE course_progress SET completed = $2, completed_at = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(progress_id)
        .bind(completed)
        .bind(completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set completion", e))
    }

    /// List every progress document belonging to a user.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<CourseProgress>> {
        sqlx::query_as::<_, CourseProgress>(
            "SELECT * FROM course_progress WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list progress", e))
    }
}
