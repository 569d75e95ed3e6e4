//! Purchase handlers — checkout, webhook, redirect confirmation, admin
//! listing.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Redirect;

use learnhub_core::error::AppError;
use learnhub_entity::purchase::{PaymentMethod, Purchase};
use learnhub_payment::types::CheckoutRedirect;

use crate::dto::request::{CheckoutRequest, EsewaVerifyQuery};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/purchase/checkout
pub async fn checkout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutRedirect>>, AppError> {
    let method: PaymentMethod = req.payment_method.parse()?;
    let redirect = state
        .purchase_service
        .create_checkout(&auth, req.course_id, method)
        .await?;
    Ok(Json(ApiResponse::ok(redirect)))
}

/// POST /api/purchase/webhook/stripe
///
/// Signature verification needs the raw body bytes, so the body is taken
/// as a `String` rather than deserialized JSON.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::gateway_verification("Missing stripe-signature header"))?;

    state
        .purchase_service
        .handle_stripe_webhook(body.as_bytes(), signature)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Received".to_string(),
    })))
}

/// GET /api/purchase/verify/esewa
///
/// The gateway redirects the buyer's browser here; the handler verifies
/// the transaction and forwards the browser to the frontend.
pub async fn esewa_verify(
    State(state): State<AppState>,
    Query(query): Query<EsewaVerifyQuery>,
) -> Result<Redirect, AppError> {
    let destination = state
        .purchase_service
        .confirm_esewa_redirect(&query.reference)
        .await?;
    Ok(Redirect::to(&destination))
}

/// GET /api/purchase (admin)
pub async fn list_purchases(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Purchase>>>, AppError> {
    let page = state
        .purchase_service
        .list_completed(&auth, &pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.into())))
}
