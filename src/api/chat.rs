use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ax_state::AppState;
use crate::core::inference;
use crate::error::{AppError, AppResult};
use crate::infra::utils::now_timestamp;
use crate::models::context::{ChatRequest, ChatResponse};

/// `POST /chat`：校验消息 -> 调用推理 -> 返回文本与时间戳
///
/// 请求体按原始字节解析，不要求 `Content-Type: application/json`。
pub async fn chat_query(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let payload: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("请求体解析失败: {}", e);
        AppError::InvalidBody(e.to_string())
    })?;

    let message = payload.message().ok_or_else(|| {
        debug!("请求缺少 message 字段");
        AppError::MissingMessage
    })?;
    debug!(message_len = message.len(), "收到提问");

    let text = inference::answer(state.provider.as_ref(), message).await?;

    Ok(Json(ChatResponse {
        response: text,
        timestamp: now_timestamp(),
    }))
}
