//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use learnhub_entity::course::CourseLevel;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Requested role: "student" (default) or "instructor".
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New photo URL.
    pub photo_url: Option<String>,
}

/// Create course request (instructor).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourseRequest {
    /// Course title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Category label.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Difficulty level.
    pub level: CourseLevel,
    /// List price in whole currency units.
    #[validate(range(min = 0))]
    pub price: i64,
}

/// Add lecture request (instructor).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddLectureRequest {
    /// Lecture title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Video URL.
    pub video_url: Option<String>,
    /// Whether the lecture is previewable without purchase.
    #[serde(default)]
    pub is_preview_free: bool,
}

/// Checkout initiation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// The course to purchase.
    pub course_id: Uuid,
    /// Gateway to use: "stripe" or "esewa".
    pub payment_method: String,
}

/// Query parameters for the eSewa redirect confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsewaVerifyQuery {
    /// The payment reference the checkout was initiated with.
    pub reference: String,
}

/// Query parameters for catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListQuery {
    /// Optional category filter.
    pub category: Option<String>,
}
