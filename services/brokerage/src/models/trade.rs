use super::{Amount, BrokerageError, BrokerageResult, Id, Price, Symbol, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 交易方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn is_buy(&self) -> bool {
        matches!(self, TradeSide::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, TradeSide::Sell)
    }

    /// 带符号的股数（买入为正，卖出为负）
    pub fn signed_shares(&self, shares: i64) -> i64 {
        match self {
            TradeSide::Buy => shares,
            TradeSide::Sell => -shares,
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

impl std::str::FromStr for TradeSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            _ => Err(anyhow::anyhow!("Invalid trade side: {}", s)),
        }
    }
}

/// 一笔已记账的交易
///
/// 流水只追加不修改，持仓由按代码求和得出
#[derive(Debug, Clone, Serialize)]
pub struct TradeRecord {
    pub id: Id,
    pub user_id: Id,
    pub symbol: Symbol,
    /// 带符号的股数：正为买入，负为卖出
    pub shares: i64,
    pub price: Price,
    pub executed_at: Timestamp,
}

impl TradeRecord {
    /// 交易方向
    pub fn side(&self) -> TradeSide {
        if self.shares >= 0 {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        }
    }

    /// 成交金额
    pub fn notional(&self) -> Amount {
        self.price * Decimal::from(self.shares.abs())
    }
}

/// 买入/卖出表单请求
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRequest {
    pub symbol: String,
    pub shares: i64,
}

impl TradeRequest {
    /// 校验并解析请求
    pub fn validate(&self) -> BrokerageResult<(Symbol, i64)> {
        if self.symbol.trim().is_empty() {
            return Err(BrokerageError::InvalidRequest(
                "Symbol is required".to_string(),
            ));
        }

        let symbol = Symbol::parse(&self.symbol)
            .ok_or_else(|| BrokerageError::InvalidSymbol(self.symbol.clone()))?;

        if self.shares <= 0 {
            return Err(BrokerageError::InvalidRequest(
                "Shares must be a positive number".to_string(),
            ));
        }

        Ok((symbol, self.shares))
    }
}

/// 已执行交易的返回视图
#[derive(Debug, Clone, Serialize)]
pub struct ExecutedTrade {
    pub symbol: Symbol,
    pub side: TradeSide,
    pub shares: i64,
    pub price: Price,
    pub total: Amount,
    pub cash_after: Amount,
}

/// 持仓（按代码聚合的净股数）
#[derive(Debug, Clone, Serialize)]
pub struct Holding {
    pub symbol: Symbol,
    pub shares: i64,
}

/// 组合中的单个持仓（含行情估值）
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPosition {
    pub symbol: Symbol,
    pub name: String,
    pub shares: i64,
    pub price: Price,
    pub value: Amount,
}

/// 投资组合视图
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioView {
    pub positions: Vec<PortfolioPosition>,
    pub cash: Amount,
    pub total: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_trade_side_round_trip() {
        assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("sell".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert!("HOLD".parse::<TradeSide>().is_err());

        assert_eq!(TradeSide::Buy.to_string(), "BUY");
        assert_eq!(TradeSide::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_signed_shares() {
        assert_eq!(TradeSide::Buy.signed_shares(5), 5);
        assert_eq!(TradeSide::Sell.signed_shares(5), -5);
    }

    #[test]
    fn test_trade_record_side_and_notional() {
        let record = TradeRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            symbol: Symbol::parse("AAPL").unwrap(),
            shares: -3,
            price: dec!(10.50),
            executed_at: Utc::now(),
        };

        assert_eq!(record.side(), TradeSide::Sell);
        assert_eq!(record.notional(), dec!(31.50));
    }

    #[test]
    fn test_trade_request_validation() {
        // 合法请求，代码被规范化
        let request = TradeRequest {
            symbol: "aapl".to_string(),
            shares: 10,
        };
        let (symbol, shares) = request.validate().unwrap();
        assert_eq!(symbol.as_str(), "AAPL");
        assert_eq!(shares, 10);

        // 缺少代码
        let request = TradeRequest {
            symbol: "  ".to_string(),
            shares: 10,
        };
        assert!(matches!(
            request.validate(),
            Err(BrokerageError::InvalidRequest(_))
        ));

        // 非法代码
        let request = TradeRequest {
            symbol: "123".to_string(),
            shares: 10,
        };
        assert!(matches!(
            request.validate(),
            Err(BrokerageError::InvalidSymbol(_))
        ));

        // 股数必须为正
        for shares in [0, -5] {
            let request = TradeRequest {
                symbol: "AAPL".to_string(),
                shares,
            };
            assert!(matches!(
                request.validate(),
                Err(BrokerageError::InvalidRequest(_))
            ));
        }
    }
}
