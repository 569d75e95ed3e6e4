//! Lecture entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single video lecture belonging to a course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lecture {
    /// Unique lecture identifier.
    pub id: Uuid,
    /// Owning course.
    pub course_id: Uuid,
    /// Lecture title.
    pub title: String,
    /// Hosted video URL.
    pub video_url: Option<String>,
    /// Whether the lecture is viewable without purchase.
    pub is_preview_free: bool,
    /// Ordering position within the course (1-based).
    pub position: i32,
    /// When the lecture was created.
    pub created_at: DateTime<Utc>,
}
