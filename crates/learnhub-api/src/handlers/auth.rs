//! Auth handlers — register, login, me, profile, enrolled courses.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use learnhub_core::error::AppError;
use learnhub_entity::course::Course;
use learnhub_entity::user::{User, UserRole};

use crate::dto::request::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::dto::response::{ApiResponse, AuthResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role = match req.role.as_deref() {
        None => UserRole::Student,
        Some(r) => r
            .parse()
            .map_err(|_| AppError::validation(format!("Unknown role: '{r}'")))?,
    };

    let result = state
        .user_service
        .register(&req.name, &req.email, &req.password, role)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token: result.token,
        expires_at: result.expires_at,
        user: result.user,
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state.user_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token: result.token,
        expires_at: result.expires_at,
        user: result.user,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/auth/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state
        .user_service
        .update_profile(&auth, req.name.as_deref(), req.photo_url.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/auth/me/courses
pub async fn enrolled_courses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let courses = state.user_service.enrolled_courses(&auth).await?;
    Ok(Json(ApiResponse::ok(courses)))
}
