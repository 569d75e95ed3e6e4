//! Enrollment entity model.
//!
//! An enrollment row is the durable fact that a user may access a
//! course's content. The single relation answers both "which courses is
//! this user enrolled in" and "which students are enrolled in this
//! course". Rows are written only by the purchase confirmation step
//! (or an out-of-band admin grant), via an idempotent set-add.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Membership of a user in a course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    /// The enrolled user.
    pub user_id: Uuid,
    /// The course the user is enrolled in.
    pub course_id: Uuid,
    /// When the enrollment was granted.
    pub enrolled_at: DateTime<Utc>,
}
