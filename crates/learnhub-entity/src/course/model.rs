//! Course entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "course_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// A course offered on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique course identifier.
    pub id: Uuid,
    /// Course title.
    pub title: String,
    /// Short subtitle shown in listings.
    pub subtitle: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Category label (e.g. "Web Development").
    pub category: String,
    /// Difficulty level.
    pub level: CourseLevel,
    /// List price in whole currency units.
    pub price: i64,
    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,
    /// The instructor who created the course.
    pub creator_id: Uuid,
    /// Whether the course is visible in the catalog and purchasable.
    pub is_published: bool,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
    /// When the course was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    /// Course title.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Difficulty level.
    pub level: CourseLevel,
    /// List price in whole currency units.
    pub price: i64,
    /// The creating instructor.
    pub creator_id: Uuid,
}
