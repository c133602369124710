use anyhow::Result;
use shared_utils::{AppMetrics, JwtService};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    config::AppConfig,
    quotes::{HttpQuoteSource, QuoteSource, SimulatedQuoteSource},
    services::{AccountService, PortfolioService, TradingService},
    storage::{TradeStore, UserStore},
};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub metrics: Arc<AppMetrics>,
    pub db_pool: Arc<PgPool>,
    pub jwt_service: Arc<JwtService>,
    pub quote_source: Arc<dyn QuoteSource>,

    // 存储层
    pub user_store: Arc<UserStore>,
    pub trade_store: Arc<TradeStore>,

    // 服务层
    pub account_service: Arc<AccountService>,
    pub trading_service: Arc<TradingService>,
    pub portfolio_service: Arc<PortfolioService>,
}

impl AppState {
    pub async fn new(config: AppConfig, metrics: Arc<AppMetrics>) -> Result<Self> {
        // 创建数据库连接池
        let db_pool = Arc::new(
            PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?,
        );

        // 执行数据库迁移
        sqlx::migrate!()
            .run(&*db_pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

        // 创建行情源
        let quote_source: Arc<dyn QuoteSource> = match config.quotes.provider.as_str() {
            "http" => Arc::new(HttpQuoteSource::new(&config.quotes)?),
            _ => Arc::new(SimulatedQuoteSource::new()),
        };

        // 创建JWT服务
        let jwt_service = Arc::new(JwtService::new(
            &config.auth.jwt_secret,
            &config.auth.issuer,
            &config.auth.audience,
            config.auth.session_ttl_secs,
        ));

        // 创建存储层
        let user_store = Arc::new(UserStore::new(db_pool.clone()));
        let trade_store = Arc::new(TradeStore::new(db_pool.clone()));

        // 创建服务层
        let account_service = Arc::new(AccountService::new(
            user_store.clone(),
            config.trading.initial_cash,
        ));
        let trading_service = Arc::new(TradingService::new(
            user_store.clone(),
            trade_store.clone(),
            quote_source.clone(),
        ));
        let portfolio_service = Arc::new(PortfolioService::new(
            user_store.clone(),
            trade_store.clone(),
            quote_source.clone(),
        ));

        Ok(Self {
            config,
            metrics,
            db_pool,
            jwt_service,
            quote_source,
            user_store,
            trade_store,
            account_service,
            trading_service,
            portfolio_service,
        })
    }

    /// 检查数据库健康状态
    pub async fn check_database_health(&self) -> String {
        match sqlx::query("SELECT 1").fetch_one(&*self.db_pool).await {
            Ok(_) => "healthy".to_string(),
            Err(e) => format!("unhealthy: {}", e),
        }
    }
}
