//! Progress handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use learnhub_core::error::AppError;
use learnhub_entity::progress::CourseProgress;
use learnhub_service::progress::ProgressView;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/progress
pub async fn list_progress(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<CourseProgress>>>, AppError> {
    let progress = state.progress_service.list_progress(&auth).await?;
    Ok(Json(ApiResponse::ok(progress)))
}

/// GET /api/progress/{course_id}
pub async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProgressView>>, AppError> {
    let view = state.progress_service.get_progress(&auth, course_id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/progress/{course_id}/lectures/{lecture_id}/view
pub async fn view_lecture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((course_id, lecture_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<CourseProgress>>, AppError> {
    let progress = state
        .progress_service
        .update_lecture_progress(&auth, course_id, lecture_id)
        .await?;
    Ok(Json(ApiResponse::ok(progress)))
}

/// PUT /api/progress/{course_id}/complete
pub async fn mark_completed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseProgress>>, AppError> {
    let progress = state
        .progress_service
        .mark_completed(&auth, course_id)
        .await?;
    Ok(Json(ApiResponse::ok(progress)))
}

/// PUT /api/progress/{course_id}/incomplete
pub async fn mark_incompleted(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseProgress>>, AppError> {
    let progress = state
        .progress_service
        .mark_incompleted(&auth, course_id)
        .await?;
    Ok(Json(ApiResponse::ok(progress)))
}
