use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{
    Amount, BrokerageError, BrokerageResult, ExecutedTrade, Symbol, TradeRecord, TradeRequest,
    TradeSide,
};
use crate::quotes::{Quote, QuoteSource};
use crate::storage::{TradeStore, UserStore};

/// 交易服务
#[derive(Clone)]
pub struct TradingService {
    user_store: Arc<UserStore>,
    trade_store: Arc<TradeStore>,
    quote_source: Arc<dyn QuoteSource>,
}

impl TradingService {
    pub fn new(
        user_store: Arc<UserStore>,
        trade_store: Arc<TradeStore>,
        quote_source: Arc<dyn QuoteSource>,
    ) -> Self {
        Self {
            user_store,
            trade_store,
            quote_source,
        }
    }

    /// 买入
    pub async fn buy(&self, user_id: Uuid, request: TradeRequest) -> BrokerageResult<ExecutedTrade> {
        // 1. 校验请求
        let (symbol, shares) = request.validate()?;

        // 2. 获取实时报价并计算成本
        let quote = self.lookup_quote(&symbol).await?;
        let cost = quote.price * Decimal::from(shares);

        // 3. 资金检查
        let cash = self.user_store.get_cash(user_id).await?;
        ensure_affordable(cash, cost)?;

        // 4. 记账并扣减现金
        let trade = TradeRecord {
            id: Uuid::new_v4(),
            user_id,
            symbol: quote.symbol.clone(),
            shares: TradeSide::Buy.signed_shares(shares),
            price: quote.price,
            executed_at: Utc::now(),
        };
        self.trade_store.record_trade(&trade, -cost).await?;

        tracing::info!(
            "User {} bought {} {} at {}",
            user_id,
            shares,
            trade.symbol,
            quote.price
        );

        Ok(ExecutedTrade {
            symbol: trade.symbol,
            side: TradeSide::Buy,
            shares,
            price: quote.price,
            total: cost,
            cash_after: cash - cost,
        })
    }

    /// 卖出
    pub async fn sell(&self, user_id: Uuid, request: TradeRequest) -> BrokerageResult<ExecutedTrade> {
        // 1. 校验请求
        let (symbol, shares) = request.validate()?;

        // 2. 持仓检查
        let owned = self.trade_store.holding_shares(user_id, &symbol).await?;
        ensure_sellable(owned, shares)?;

        // 3. 获取实时报价并计算回款
        let quote = self.lookup_quote(&symbol).await?;
        let revenue = quote.price * Decimal::from(shares);

        // 4. 记账并增加现金
        let cash = self.user_store.get_cash(user_id).await?;
        let trade = TradeRecord {
            id: Uuid::new_v4(),
            user_id,
            symbol: quote.symbol.clone(),
            shares: TradeSide::Sell.signed_shares(shares),
            price: quote.price,
            executed_at: Utc::now(),
        };
        self.trade_store.record_trade(&trade, revenue).await?;

        tracing::info!(
            "User {} sold {} {} at {}",
            user_id,
            shares,
            trade.symbol,
            quote.price
        );

        Ok(ExecutedTrade {
            symbol: trade.symbol,
            side: TradeSide::Sell,
            shares,
            price: quote.price,
            total: revenue,
            cash_after: cash + revenue,
        })
    }

    /// 查询当前可卖出的代码列表
    pub async fn sellable_symbols(&self, user_id: Uuid) -> BrokerageResult<Vec<Symbol>> {
        let holdings = self.trade_store.list_holdings(user_id).await?;
        Ok(holdings.into_iter().map(|h| h.symbol).collect())
    }

    /// 查询报价，未知代码视为业务错误
    async fn lookup_quote(&self, symbol: &Symbol) -> BrokerageResult<Quote> {
        self.quote_source
            .lookup(symbol)
            .await
            .map_err(|e| BrokerageError::QuoteError(e.to_string()))?
            .ok_or_else(|| BrokerageError::UnknownSymbol(symbol.clone()))
    }
}

/// 买入资金检查
fn ensure_affordable(cash: Amount, cost: Amount) -> BrokerageResult<()> {
    if cash < cost {
        return Err(BrokerageError::InsufficientCash {
            required: cost,
            available: cash,
        });
    }
    Ok(())
}

/// 卖出持仓检查
fn ensure_sellable(owned: i64, requested: i64) -> BrokerageResult<()> {
    if owned < requested {
        return Err(BrokerageError::InsufficientShares { requested, owned });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ensure_affordable() {
        assert!(ensure_affordable(dec!(1000), dec!(999.99)).is_ok());
        assert!(ensure_affordable(dec!(1000), dec!(1000)).is_ok());

        // 资金不足
        let err = ensure_affordable(dec!(100), dec!(100.01)).unwrap_err();
        match err {
            BrokerageError::InsufficientCash {
                required,
                available,
            } => {
                assert_eq!(required, dec!(100.01));
                assert_eq!(available, dec!(100));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_ensure_sellable() {
        assert!(ensure_sellable(10, 10).is_ok());
        assert!(ensure_sellable(10, 3).is_ok());

        // 持仓不足
        let err = ensure_sellable(2, 5).unwrap_err();
        match err {
            BrokerageError::InsufficientShares { requested, owned } => {
                assert_eq!(requested, 5);
                assert_eq!(owned, 2);
            }
            other => panic!("Unexpected error: {:?}", other),
        }

        // 无持仓时不可卖出
        assert!(ensure_sellable(0, 1).is_err());
    }
}
