use anyhow::Context;
use chat_gateway::{ax_state::AppState, infra::config::AppConfig, infra::workers_ai::WorkersAiClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chat_gateway=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("加载配置失败")?;
    info!(?config, "配置已加载");

    // 全局共用一个 HTTP 客户端
    let http = reqwest::Client::builder()
        .user_agent(concat!("chat-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("构建 HTTP 客户端失败")?;

    let provider = WorkersAiClient::new(
        http,
        config.base_url.clone(),
        config.account_id.clone(),
        config.api_token.clone(),
        config.model.clone(),
    );
    let state = Arc::new(AppState {
        provider: Arc::new(provider),
    });

    let app = chat_gateway::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("绑定 {} 失败", config.bind_addr))?;
    info!("🚀 聊天网关运行在 http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
        std::future::pending::<()>().await;
    }
}
