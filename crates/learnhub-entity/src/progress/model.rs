//! Course progress entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user, per-course progress document.
///
/// `completed` is derived: true iff every lecture belonging to the course
/// has a viewed [`LectureProgress`] entry. It is recomputed on each view
/// event, not incrementally tracked. The manual complete/incomplete
/// override may desynchronize it from actual viewing, by product design.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseProgress {
    /// Unique progress identifier.
    pub id: Uuid,
    /// The learning user.
    pub user_id: Uuid,
    /// The course being tracked.
    pub course_id: Uuid,
    /// Whether every lecture has been viewed (or manually overridden).
    pub completed: bool,
    /// When the course first became completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Viewed/unviewed flag for a single lecture.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LectureProgress {
    /// Owning progress document.
    #[serde(skip_serializing)]
    pub progress_id: Uuid,
    /// The lecture this entry tracks.
    pub lecture_id: Uuid,
    /// Whether the lecture has been viewed.
    pub viewed: bool,
}
