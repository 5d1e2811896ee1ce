use crate::models::schema::ChatMessage;
use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// 固定的系统指令，每次对话都放在第一条
pub const SYSTEM_PROMPT: &str = "You are SUPER AI, a helpful AI assistant that can answer any question in Bahasa Indonesia and English.";

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request to inference provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("inference provider reported failure: {0}")]
    Provider(String),

    #[error("malformed inference result: {0}")]
    MalformedResponse(String),
}

/// 外部推理能力：输入有序的角色消息，输出生成文本
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn run(&self, messages: &[ChatMessage]) -> Result<String, InferenceError>;

    /// 用于日志标识
    fn name(&self) -> &str;
}

/// 组装 [系统指令, 用户消息] 对话
pub fn build_conversation(user_message: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_message),
    ]
}

/// 单轮问答：拼装对话、调用推理并记录耗时
#[instrument(skip_all, fields(provider = provider.name(), message_len = user_message.len()))]
pub async fn answer(
    provider: &dyn InferenceProvider,
    user_message: &str,
) -> Result<String, InferenceError> {
    let messages = build_conversation(user_message);
    let started = Instant::now();

    match provider.run(&messages).await {
        Ok(text) => {
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                response_len = text.len(),
                "推理完成"
            );
            Ok(text)
        }
        Err(e) => {
            warn!(elapsed_ms = started.elapsed().as_millis() as u64, "推理失败: {}", e);
            Err(e)
        }
    }
}
