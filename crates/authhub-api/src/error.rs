//! Maps domain `AppError` to HTTP responses.
//!
//! The body is the same envelope the command transport replies with, so a
//! given failure reads identically on both transports; only the carrier
//! (HTTP status vs. structured payload) differs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::types::response::Envelope;

/// Newtype carrying an [`AppError`] across the Axum boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.kind == ErrorKind::Internal || err.kind == ErrorKind::Database {
            tracing::error!(error = %err.message, "Internal server error");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(Envelope::from(&err))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_comes_from_the_error_kind() {
        let response = ApiError(AppError::unauthorized("Invalid credentials")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError(AppError::forbidden("Inactive")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = ApiError(AppError::not_found("Missing")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError(AppError::conflict("Duplicate")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
