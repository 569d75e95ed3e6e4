//! Progress tracking service.
//!
//! Course completion is derived, never incremented: after every change
//! the full lecture list is compared against the viewed entries. The
//! manual complete/incomplete override bulk-writes every entry and may
//! therefore desynchronize the flags from actual viewing.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use learnhub_core::error::AppError;
use learnhub_core::result::AppResult;
use learnhub_database::repositories::course::CourseRepository;
use learnhub_database::repositories::enrollment::EnrollmentRepository;
use learnhub_database::repositories::progress::ProgressRepository;
use learnhub_database::repositories::purchase::PurchaseRepository;
use learnhub_entity::course::Lecture;
use learnhub_entity::progress::{CourseProgress, LectureProgress};

use crate::context::RequestContext;

/// Tracks per-lecture viewing and derives course completion.
#[derive(Debug, Clone)]
pub struct ProgressService {
    course_repo: Arc<CourseRepository>,
    progress_repo: Arc<ProgressRepository>,
    purchase_repo: Arc<PurchaseRepository>,
    enrollment_repo: Arc<EnrollmentRepository>,
}

/// A progress document with its lecture entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressView {
    /// The queried course.
    pub course_id: Uuid,
    /// Whether the course counts as completed.
    pub completed: bool,
    /// Per-lecture viewed flags. Empty when tracking has not started.
    pub lectures: Vec<LectureProgress>,
}

impl ProgressService {
    /// Creates a new progress service.
    pub fn new(
        course_repo: Arc<CourseRepository>,
        progress_repo: Arc<ProgressRepository>,
        purchase_repo: Arc<PurchaseRepository>,
        enrollment_repo: Arc<EnrollmentRepository>,
    ) -> Self {
        Self {
            course_repo,
            progress_repo,
            purchase_repo,
            enrollment_repo,
        }
    }

    /// Read progress for a course. Side-effect free: a user who never
    /// viewed anything gets an empty default, not a created row.
    pub async fn get_progress(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
    ) -> AppResult<ProgressView> {
        self.authorize_learner(ctx, course_id).await?;

        match self.progress_repo.find(ctx.user_id, course_id).await? {
            Some(progress) => {
                let lectures = self.progress_repo.lecture_entries(progress.id).await?;
                Ok(ProgressView {
                    course_id,
                    completed: progress.completed,
                    lectures,
                })
            }
            None => Ok(ProgressView {
                course_id,
                completed: false,
                lectures: Vec::new(),
            }),
        }
    }

    /// Record that a lecture was viewed and recompute completion.
    pub async fn update_lecture_progress(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
        lecture_id: Uuid,
    ) -> AppResult<CourseProgress> {
        self.authorize_learner(ctx, course_id).await?;

        let lectures = self.course_repo.find_lectures(course_id).await?;
        if !lectures.iter().any(|l| l.id == lecture_id) {
            return Err(AppError::not_found("Lecture not found in this course"));
        }

        let progress = self.progress_repo.create(ctx.user_id, course_id).await?;
        self.progress_repo
            .upsert_lecture(progress.id, lecture_id, true)
            .await?;

        let entries = self.progress_repo.lecture_entries(progress.id).await?;
        let completed = derive_completed(&lectures, &entries);
        self.store_completion(&progress, completed).await
    }

    /// Manually mark a whole course completed.
    pub async fn mark_completed(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
    ) -> AppResult<CourseProgress> {
        self.authorize_learner(ctx, course_id).await?;

        let lectures = self.course_repo.find_lectures(course_id).await?;
        let progress = self.progress_repo.create(ctx.user_id, course_id).await?;

        let ids: Vec<Uuid> = lectures.iter().map(|l| l.id).collect();
        if !ids.is_empty() {
            self.progress_repo
                .set_all_lectures(progress.id, &ids, true)
                .await?;
        }

        info!(user_id = %ctx.user_id, course_id = %course_id, "Course manually completed");
        self.store_completion(&progress, true).await
    }

    /// Manually reset a whole course to incomplete.
    pub async fn mark_incompleted(
        &self,
        ctx: &RequestContext,
        course_id: Uuid,
    ) -> AppResult<CourseProgress> {
        self.authorize_learner(ctx, course_id).await?;

        let lectures = self.course_repo.find_lectures(course_id).await?;
        let progress = self.progress_repo.create(ctx.user_id, course_id).await?;

        let ids: Vec<Uuid> = lectures.iter().map(|l| l.id).collect();
        if !ids.is_empty() {
            self.progress_repo
                .set_all_lectures(progress.id, &ids, false)
                .await?;
        }

        info!(user_id = %ctx.user_id, course_id = %course_id, "Course reset to incomplete");
        self.progress_repo
            .set_completed(progress.id, false, None)
            .await
    }

    /// List every progress document belonging to the acting user.
    pub async fn list_progress(&self, ctx: &RequestContext) -> AppResult<Vec<CourseProgress>> {
        self.progress_repo.list_for_user(ctx.user_id).await
    }

    /// `completed_at` records when the course *first* became completed,
    /// so it is only stamped on the false-to-true transition.
    async fn store_completion(
        &self,
        progress: &CourseProgress,
        completed: bool,
    ) -> AppResult<CourseProgress> {
        let completed_at = if completed {
            progress.completed_at.or_else(|| Some(Utc::now()))
        } else {
            None
        };
        self.progress_repo
            .set_completed(progress.id, completed, completed_at)
            .await
    }

    /// Progress is only trackable on owned courses.
    async fn authorize_learner(&self, ctx: &RequestContext, course_id: Uuid) -> AppResult<()> {
        if self
            .purchase_repo
            .has_completed(ctx.user_id, course_id)
            .await?
            || self.enrollment_repo.exists(ctx.user_id, course_id).await?
        {
            return Ok(());
        }
        Err(AppError::authorization("Course not purchased"))
    }
}

/// A course is completed iff it has at least one lecture and every
/// lecture has a viewed entry.
fn derive_completed(lectures: &[Lecture], entries: &[LectureProgress]) -> bool {
    if lectures.is_empty() {
        return false;
    }
    lectures
        .iter()
        .all(|l| entries.iter().any(|e| e.lecture_id == l.id && e.viewed))
}
