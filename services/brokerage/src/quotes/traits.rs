use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Price, Symbol};

/// 行情报价
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub name: String,
    pub price: Price,
}

/// 行情源错误类型
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Upstream error: HTTP {0}")]
    UpstreamError(u16),
}

pub type QuoteResult<T> = Result<T, QuoteError>;

/// 统一行情源接口
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// 查询当前报价，未知代码返回None
    async fn lookup(&self, symbol: &Symbol) -> QuoteResult<Option<Quote>>;
}
