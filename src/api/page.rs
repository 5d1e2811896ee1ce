use axum::response::{Html, IntoResponse};

use crate::error::AppError;

/// 内嵌的聊天页面
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// 其余路径或方法统一 404
pub async fn not_found() -> impl IntoResponse {
    AppError::NotFound
}
