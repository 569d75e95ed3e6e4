//! Certificate handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use learnhub_core::error::AppError;
use learnhub_entity::certificate::Certificate;
use learnhub_service::certificate::CertificateStatus;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/certificates/{course_id}
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Certificate>>, AppError> {
    let certificate = state
        .certificate_service
        .generate(&auth, course_id)
        .await?;
    Ok(Json(ApiResponse::ok(certificate)))
}

/// GET /api/certificates/{course_id}
pub async fn fetch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CertificateStatus>>, AppError> {
    let status = state
        .certificate_service
        .fetch_or_generate(&auth, course_id)
        .await?;
    Ok(Json(ApiResponse::ok(status)))
}
