use axum::{Json, extract::State, response::IntoResponse};

use crate::{endpoints::ApiResponse, services, state::AppState};

#[tracing::instrument(skip(state))]
pub async fn query(State(state): State<AppState>) -> impl IntoResponse {
    let expenses = services::expenses::query(&state.data).await;

    return Json(ApiResponse::data(expenses));
}
