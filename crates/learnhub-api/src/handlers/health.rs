//! Health check handler.

use axum::Json;
use axum::extract::State;

use learnhub_core::error::AppError;
use learnhub_database::connection;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, AppError> {
    let database = match connection::health_check(&state.db_pool).await {
        Ok(true) => "up",
        _ => "down",
    };

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: if database == "up" { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })))
}
