mod config;
mod handlers;
mod middleware;
mod models;
mod quotes;
mod services;
mod state;
mod storage;

use anyhow::Result;
use shared_utils::{AppMetrics, LoggingInitializer};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    config::AppConfig,
    handlers::create_routes,
    middleware::{metrics::metrics_middleware, session::session_middleware},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 初始化日志
    LoggingInitializer::init_dev()?;

    // 加载配置
    let config = AppConfig::load()?;
    info!("Brokerage configuration loaded");

    // 初始化指标
    let metrics = Arc::new(AppMetrics::new()?);
    info!("Metrics initialized");

    // 创建应用状态
    let state = AppState::new(config.clone(), metrics.clone()).await?;
    info!("Application state initialized");

    // 创建中间件层
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(axum::middleware::from_fn_with_state(state.clone(), metrics_middleware))
        .layer(axum::middleware::from_fn_with_state(state.clone(), session_middleware));

    // 创建路由
    let app = create_routes().layer(middleware).with_state(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Brokerage server starting on {}", addr);
    info!("📊 Metrics available at http://{}/metrics", addr);
    info!("🏥 Health check available at http://{}/health", addr);
    info!("💼 Portfolio available at http://{}/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
