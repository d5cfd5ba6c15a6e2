use axum::response::IntoResponse;

use crate::error::ApiError;

pub mod query;
pub use query::query;

pub mod create;
pub use create::create;

pub mod preflight;
pub use preflight::preflight;

pub async fn method_not_allowed() -> impl IntoResponse {
    return ApiError::MethodNotAllowed;
}
