//! Course catalog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use learnhub_core::error::AppError;
use learnhub_entity::course::{Course, Lecture};
use learnhub_service::catalog::CourseDetail;
use learnhub_service::purchase::CourseStatus;

use crate::dto::request::{AddLectureRequest, CourseListQuery, CreateCourseRequest};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Course>>>, AppError> {
    let page = state
        .catalog_service
        .list_published(filter.category.as_deref(), &pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseDetail>>, AppError> {
    let detail = state.catalog_service.course_detail(course_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// GET /api/courses/{id}/status
pub async fn course_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseStatus>>, AppError> {
    let status = state.purchase_service.course_status(&auth, course_id).await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let course = state
        .catalog_service
        .create_course(&auth, &req.title, &req.category, req.level, req.price)
        .await?;
    Ok(Json(ApiResponse::ok(course)))
}

/// POST /api/courses/{id}/lectures
pub async fn add_lecture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
    Json(req): Json<AddLectureRequest>,
) -> Result<Json<ApiResponse<Lecture>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let lecture = state
        .catalog_service
        .add_lecture(
            &auth,
            course_id,
            &req.title,
            req.video_url.as_deref(),
            req.is_preview_free,
        )
        .await?;
    Ok(Json(ApiResponse::ok(lecture)))
}

/// PUT /api/courses/{id}/publish
pub async fn publish_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.catalog_service.publish_course(&auth, course_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Course published".to_string(),
    })))
}
