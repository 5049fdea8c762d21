pub(crate) mod agent;
pub(crate) mod health;

use axum::http::StatusCode;
use axum::Json;

use crate::dto::ErrorResponse;

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: error.into() }))
}
