use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::IntoResponse,
};
use http::StatusCode;

use crate::{endpoints::ApiResponse, error::ApiError, services, state::AppState};

#[tracing::instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(state.config.max_body_bytes)
        } else {
            ApiError::ServerError(rejection.body_text())
        }
    })?;

    let expense = services::expenses::create(&state.data, &body).await?;

    return Ok((StatusCode::CREATED, Json(ApiResponse::data(expense))));
}
