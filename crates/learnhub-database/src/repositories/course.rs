//! Course and lecture repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use learnhub_core::error::{AppError, ErrorKind};
use learnhub_core::result::AppResult;
use learnhub_core::types::pagination::{PageRequest, PageResponse};
use learnhub_entity::course::{Course, CreateCourse, Lecture};

/// Repository for catalog reads and course authoring.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find course", e))
    }

    /// List a course's lectures in presentation order.
    pub async fn find_lectures(&self, course_id: Uuid) -> AppResult<Vec<Lecture>> {
        sqlx::query_as::<_, Lecture>(
            "SELECT * FROM lectures WHERE course_id = $1 ORDER BY position ASC",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list lectures", e))
    }

    /// List published courses, optionally filtered by category.
    pub async fn list_published(
        &self,
        category: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Course>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM courses WHERE is_published = TRUE \
             AND ($1::TEXT IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count courses", e))?;

        let courses = sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE is_published = TRUE \
             AND ($1::TEXT IS NULL OR category = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(category)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list courses", e))?;

        Ok(PageResponse::new(
            courses,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new course (unpublished by default).
    pub async fn create(&self, data: &CreateCourse) -> AppResult<Course> {
        sqlx::query_as::<_, Course>(
            "INSERT INTO courses (title, category, level, price, creator_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.category)
        .bind(data.level)
        .bind(data.price)
        .bind(data.creator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create course", e))
    }

    /// Publish a course, making it visible and purchasable.
    pub async fn publish(&self, id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE courses SET is_published = TRUE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to publish course", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a lecture to a course.
    pub async fn add_lecture(
        &self,
        course_id: Uuid,
        title: &str,
        video_url: Option<&str>,
        is_preview_free: bool,
    ) -> AppResult<Lecture> {
        sqlx::query_as::<_, Lecture>(
            "INSERT INTO lectures (course_id, title, video_url, is_preview_free, position) \
             VALUES ($1, $2, $3, $4, \
                     (SELECT COALESCE(MAX(position), 0) + 1 FROM lectures WHERE course_id = $1)) \
             RETURNING *",
        )
        .bind(course_id)
        .bind(title)
        .bind(video_url)
        .bind(is_preview_free)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add lecture", e))
    }
}
