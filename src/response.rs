use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_carries_data_without_message() {
        let resp = ApiResponse::ok("payload");
        assert!(resp.success);
        assert_eq!(resp.data, Some("payload"));
        assert!(resp.message.is_none());
    }

    #[test]
    fn with_message_carries_both() {
        let resp = ApiResponse::with_message(42, "Signup successful".to_string());
        assert!(resp.success);
        assert_eq!(resp.data, Some(42));
        assert_eq!(resp.message.as_deref(), Some("Signup successful"));
    }
}
