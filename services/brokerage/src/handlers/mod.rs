use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod history;
pub mod portfolio;
pub mod quote;
pub mod response;
pub mod trading;

/// 创建所有路由
pub fn create_routes() -> Router<AppState> {
    Router::new()
        // 健康检查和指标
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        // 注册与会话
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        // 投资组合与历史
        .route("/", get(portfolio::index))
        .route("/history", get(history::history))
        // 交易
        .route("/buy", post(trading::buy))
        .route("/sell", get(trading::sellable).post(trading::sell))
        // 报价
        .route("/quote", get(quote::quote_get).post(quote::quote_post))
}
