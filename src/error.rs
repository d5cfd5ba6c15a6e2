use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("server error: {0}")]
    ServerError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message, details) = match self {
            ApiError::BadRequest(ref err) => (StatusCode::BAD_REQUEST, err.to_owned(), None),
            ApiError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_owned(),
                None,
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_owned(),
                None,
            ),
            ApiError::ServerError(ref details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error".to_owned(),
                Some(details.to_owned()),
            ),
        };

        if status_code.is_server_error() {
            tracing::error!("{:#?}", self);
        } else {
            tracing::warn!("{}", self);
        }

        return (
            status_code,
            Json(ErrorBody {
                success: false,
                error: error_message,
                details,
            }),
        )
            .into_response();
    }
}
