//! 请求边界的错误类型与 HTTP 响应映射

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::core::inference::InferenceError;
use crate::models::context::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// 请求体无法解析
    #[error("Invalid JSON body")]
    InvalidBody(String),

    #[error("Message is required")]
    MissingMessage,

    #[error("AI service error")]
    Provider(#[from] InferenceError),

    #[error("Not Found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            AppError::InvalidBody(detail) => (StatusCode::BAD_REQUEST, Some(detail.clone())),
            AppError::MissingMessage => (StatusCode::BAD_REQUEST, None),
            AppError::Provider(e) => (StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string())),
            AppError::NotFound => return (StatusCode::NOT_FOUND, "Not Found").into_response(),
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
            details,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn split(err: AppError) -> (StatusCode, String) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn missing_message_is_bare_400() {
        let (status, body) = split(AppError::MissingMessage).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Message is required"}"#);
    }

    #[tokio::test]
    async fn provider_error_carries_details() {
        let err = AppError::from(InferenceError::Provider("capacity exceeded".into()));
        let (status, body) = split(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let json: ErrorResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(json.error, "AI service error");
        assert_eq!(
            json.details.as_deref(),
            Some("inference provider reported failure: capacity exceeded")
        );
    }

    #[tokio::test]
    async fn not_found_is_plain_text() {
        let (status, body) = split(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not Found");
    }
}
