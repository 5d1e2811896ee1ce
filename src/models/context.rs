use serde::{Deserialize, Serialize};

/// `POST /chat` 请求体
///
/// `message` 缺失与显式 `null` 都按"未提供"处理，由处理器给出 400。
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>, // 用户提问内容
}

impl ChatRequest {
    /// 返回非空的提问内容，空串视同缺失
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
