use axum::{Json, response::IntoResponse};
use http::StatusCode;

use crate::endpoints::ApiResponse;

pub async fn preflight() -> impl IntoResponse {
    return (StatusCode::NO_CONTENT, Json(ApiResponse::ok()));
}
