pub mod trade;

pub use trade::*;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 通用ID类型
pub type Id = Uuid;

/// 通用时间戳类型
pub type Timestamp = DateTime<Utc>;

/// 通用价格类型
pub type Price = Decimal;

/// 通用金额类型
pub type Amount = Decimal;

/// 股票代码
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// 解析并规范化股票代码（去空白、统一大写）
    ///
    /// 合法格式：1-10个字符，首字符为字母，其余为字母或点号（如 BRK.B）
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 10 {
            return None;
        }

        let upper = trimmed.to_uppercase();
        let mut chars = upper.chars();

        let first = chars.next()?;
        if !first.is_ascii_alphabetic() {
            return None;
        }
        if !chars.all(|c| c.is_ascii_alphabetic() || c == '.') {
            return None;
        }

        Some(Self(upper))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Symbol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| anyhow::anyhow!("Invalid symbol: {}", s))
    }
}

/// 错误类型
#[derive(Debug, thiserror::Error)]
pub enum BrokerageError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Symbol not found: {0}")]
    UnknownSymbol(Symbol),

    #[error("Insufficient cash: required {required}, available {available}")]
    InsufficientCash { required: Amount, available: Amount },

    #[error("Insufficient shares: requested {requested}, owned {owned}")]
    InsufficientShares { requested: i64, owned: i64 },

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Invalid username and/or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(Id),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Quote source error: {0}")]
    QuoteError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type BrokerageResult<T> = Result<T, BrokerageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_parsing() {
        // 规范化：大写、去空白
        let symbol = Symbol::parse("aapl").unwrap();
        assert_eq!(symbol.as_str(), "AAPL");

        let symbol = Symbol::parse("  msft ").unwrap();
        assert_eq!(symbol.as_str(), "MSFT");

        // 带点号的股份类别
        let symbol = Symbol::parse("brk.b").unwrap();
        assert_eq!(symbol.as_str(), "BRK.B");

        // 非法格式
        assert!(Symbol::parse("").is_none());
        assert!(Symbol::parse("   ").is_none());
        assert!(Symbol::parse("123").is_none());
        assert!(Symbol::parse(".A").is_none());
        assert!(Symbol::parse("AA PL").is_none());
        assert!(Symbol::parse("TOOLONGSYMBOL").is_none());
    }

    #[test]
    fn test_symbol_from_str() {
        let symbol: Symbol = "nvda".parse().unwrap();
        assert_eq!(symbol.to_string(), "NVDA");

        assert!("$$".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_error_display() {
        let err = BrokerageError::InsufficientShares {
            requested: 5,
            owned: 2,
        };
        assert_eq!(err.to_string(), "Insufficient shares: requested 5, owned 2");

        let err = BrokerageError::UnknownSymbol(Symbol::parse("ZZZZ").unwrap());
        assert_eq!(err.to_string(), "Symbol not found: ZZZZ");
    }
}
