//! Catalog reads and course authoring.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;
use learnhub_core::types::pagination::{PageRequest, PageResponse};
use learnhub_database::repositories::course::CourseRepository;
use learnhub_entity::course::{Course, CreateCourse, CourseLevel, Lecture};

use crate::context::RequestContext;

/// Catalog reads plus instructor-side authoring.
#[derive(Debug, Clone)]
pub struct CatalogService {
    course_repo: Arc<CourseRepository>,
}

/// A course with its lecture list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    /// The course itself.
    #[serde(flatten)]
    pub course: Course,
    /// Lectures in presentation order.
    pub lectures: Vec<Lecture>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(course_repo: Arc<CourseRepository>) -> Self {
        Self { course_repo }
    }

    /// Lists published courses, optionally filtered by category.
    pub async fn list_published(
        &self,
        category: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Course>> {
        self.course_repo.list_published(category, page).await
    }

    /// Fetches one course with its lectures.
    pub async fn course_detail(&self, course_id: Uuid) -> AppResult<CourseDetail> {
        let course = self
            .course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;
        let lectures = self.course_repo.find_lectures(course_id).await?;
        Ok(CourseDetail { course, lectures })
    }

    /// Creates an unpublished course owned by the acting instructor.
    pub async fn create_course(
        &self,
        ctx: &RequestContext,
        title: &str,
        category: &str,
        level: CourseLevel,
        price: i64,
    ) -> AppResult<Course> {
        if !ctx.can_author() {
            return Err(AppError::authorization("Only instructors can create courses"));
        }
        if title.trim().is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
        if price < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }

        let course = self
            .course_repo
            .create(&CreateCourse {
                title: title.trim().to_string(),
                category: category.to_string(),
                level,
                price,
                creator_id: ctx.user_id,
            })
            .await?;

        info!(course_id = %course.id, creator_id = %ctx.user_id, "Course created");
        Ok(course)
    }

    /// Appends a lecture to a course owned by the acting user.
    pub async fn add_lecture(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
        title: &str,
        video_url: Option<&str>,
        is_preview_free: bool,
    ) -> AppResult<Lecture> {
        self.authorize_author(ctx, course_id).await?;
        if title.trim().is_empty() {
            return Err(AppError::validation("Lecture title cannot be empty"));
        }

        self.course_repo
            .add_lecture(course_id, title.trim(), video_url, is_preview_free)
            .await
    }

    /// Publishes a course, making it visible and purchasable.
    pub async fn publish_course(&self, ctx: &RequestContext, course_id: Uuid) -> AppResult<()> {
        self.authorize_author(ctx, course_id).await?;

        if !self.course_repo.publish(course_id).await? {
            return Err(AppError::not_found("Course not found"));
        }
        info!(course_id = %course_id, "Course published");
        Ok(())
    }

    /// Only the course creator or an admin may modify a course.
    async fn authorize_author(&self, ctx: &RequestContext, course_id: Uuid) -> AppResult<()> {
        let course = self
            .course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.creator_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::authorization("Not the owner of this course"));
        }
        Ok(())
    }
}
