use crate::infra::workers_ai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use anyhow::{anyhow, Context};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// 服务启动配置，全部来自环境变量 (支持 `.env`)
///
/// | 变量                     | 默认值                                   |
/// |--------------------------|------------------------------------------|
/// | `BIND_ADDR`              | `0.0.0.0:3000`                           |
/// | `CLOUDFLARE_ACCOUNT_ID`  | 必填                                     |
/// | `CLOUDFLARE_API_TOKEN`   | 必填                                     |
/// | `AI_MODEL`               | `@cf/meta/llama-3.2-3b-instruct`         |
/// | `AI_BASE_URL`            | `https://api.cloudflare.com/client/v4`   |
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub account_id: String,
    pub api_token: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for AppConfig {
    // token 不进日志
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("account_id", &self.account_id)
            .field("api_token", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值查找函数构建配置，空白值视为未设置
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| get(key).ok_or_else(|| anyhow!("环境变量 {} 未设置", key));

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR 无法解析: {}", bind_raw))?;

        Ok(Self {
            bind_addr,
            account_id: require("CLOUDFLARE_ACCOUNT_ID")?,
            api_token: require("CLOUDFLARE_API_TOKEN")?,
            model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}
