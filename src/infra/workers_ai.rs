use crate::core::inference::{InferenceError, InferenceProvider};
use crate::models::schema::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.2-3b-instruct";

#[derive(Serialize)]
struct RunRequest<'a> {
    messages: &'a [ChatMessage],
}

/// Cloudflare API 通用返回信封
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Workers AI 文本生成模型的 REST 调用
pub struct WorkersAiClient {
    http: Client,
    base_url: String,
    account_id: String,
    api_token: String,
    model: String,
}

impl WorkersAiClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        account_id: impl Into<String>,
        api_token: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            account_id: account_id.into(),
            api_token: api_token.into(),
            model: model.into(),
        }
    }

    /// `{base}/accounts/{account}/ai/run/{model}`，模型名中的 `@` 与 `/` 原样保留
    pub fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url.trim_end_matches('/'),
            self.account_id,
            self.model.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl InferenceProvider for WorkersAiClient {
    async fn run(&self, messages: &[ChatMessage]) -> Result<String, InferenceError> {
        let url = self.run_url();
        debug!("调用 Workers AI: {}", url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&RunRequest { messages })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_response(&body)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// 从信封中取出 `result.response` 文本
fn extract_response(body: &str) -> Result<String, InferenceError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| InferenceError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    if !envelope.success {
        let joined = envelope
            .errors
            .iter()
            .map(|m| match m.code {
                Some(code) => format!("{} ({})", m.message, code),
                None => m.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        let detail = if joined.is_empty() {
            "unknown error".to_string()
        } else {
            joined
        };
        return Err(InferenceError::Provider(detail));
    }

    envelope
        .result
        .as_ref()
        .and_then(|r| r.get("response"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            InferenceError::MalformedResponse("result.response is missing or not a string".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_url_joins_account_and_model() {
        let client = WorkersAiClient::new(
            Client::new(),
            "https://api.cloudflare.com/client/v4/",
            "acc123",
            "token",
            DEFAULT_MODEL,
        );
        assert_eq!(
            client.run_url(),
            "https://api.cloudflare.com/client/v4/accounts/acc123/ai/run/@cf/meta/llama-3.2-3b-instruct"
        );
    }

    #[test]
    fn extracts_text_from_successful_envelope() {
        let body = r#"{"result":{"response":"Halo!"},"success":true,"errors":[],"messages":[]}"#;
        assert_eq!(extract_response(body).unwrap(), "Halo!");
    }

    #[test]
    fn provider_failure_joins_error_messages() {
        let body = r#"{"result":null,"success":false,"errors":[{"code":7003,"message":"No route"},{"message":"bad model"}]}"#;
        match extract_response(body) {
            Err(InferenceError::Provider(msg)) => assert_eq!(msg, "No route (7003); bad model"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_text_is_malformed() {
        for body in [
            r#"{"result":{},"success":true}"#,
            r#"{"result":{"response":12},"success":true}"#,
            r#"{"success":true}"#,
            "<html>gateway</html>",
        ] {
            assert!(
                matches!(extract_response(body), Err(InferenceError::MalformedResponse(_))),
                "body should be rejected: {}",
                body
            );
        }
    }
}
