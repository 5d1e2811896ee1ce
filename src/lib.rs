//! 聊天网关：静态聊天页面 + `POST /chat` 转发到托管推理服务

pub mod api;
pub mod core;
pub mod error;
pub mod infra;
pub mod models;

use axum::{
    body::Body,
    http::{header, Method, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::api::chat::chat_query;
use crate::api::page::{index, not_found};

pub mod ax_state {
    use crate::core::inference::InferenceProvider;
    use std::sync::Arc;

    /// 启动后只读，请求之间不共享可变状态
    pub struct AppState {
        pub provider: Arc<dyn InferenceProvider>,
    }
}

/// 所有响应都带 `Access-Control-Allow-Origin: *`，任意 OPTIONS 直接作为预检应答
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn router(state: Arc<ax_state::AppState>) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!(
            "http",
            request_id = %Uuid::new_v4(),
            method = %req.method(),
            path = %req.uri().path(),
        )
    });

    // 已知路径的错误方法同样回 404，而不是 405
    Router::new()
        .route("/", get(index).fallback(not_found))
        .route("/chat", post(chat_query).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(cors_layer())
        .layer(trace)
}
