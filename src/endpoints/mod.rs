use serde::Serialize;

pub mod expenses;

/// Success envelope: `{"success":true}` with `data` when there is any.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        return Self {
            success: true,
            data: Some(data),
        };
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        return Self {
            success: true,
            data: None,
        };
    }
}
