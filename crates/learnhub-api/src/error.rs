//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl for `AppError` lives in `learnhub_core::http_error`
//! because the orphan rule requires it to be in the crate defining `AppError`.

pub use learnhub_core::http_error::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use learnhub_core::error::AppError;

    #[test]
    fn precondition_maps_to_412() {
        let response = AppError::precondition("not yet").into_response();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    }

    #[test]
    fn gateway_verification_maps_to_400() {
        let response = AppError::gateway_verification("bad signature").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_maps_to_500() {
        let response = AppError::database("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
