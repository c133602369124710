use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{
    BrokerageError, BrokerageResult, PortfolioPosition, PortfolioView, TradeRecord,
};
use crate::quotes::QuoteSource;
use crate::storage::{TradeStore, UserStore};

/// 组合服务
#[derive(Clone)]
pub struct PortfolioService {
    user_store: Arc<UserStore>,
    trade_store: Arc<TradeStore>,
    quote_source: Arc<dyn QuoteSource>,
}

impl PortfolioService {
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

    /// 获取投资组合：持仓估值 + 现金 + 总资产
    pub async fn get_portfolio(&self, user_id: Uuid) -> BrokerageResult<PortfolioView> {
        // 1. 汇总持仓
        let holdings = self.trade_store.list_holdings(user_id).await?;

        // 2. 逐个持仓取报价估值
        let mut positions = Vec::with_capacity(holdings.len());
        let mut total = Decimal::ZERO;
        for holding in holdings {
            let quote = self
                .quote_source
                .lookup(&holding.symbol)
                .await
                .map_err(|e| BrokerageError::QuoteError(e.to_string()))?
                .ok_or_else(|| {
                    BrokerageError::QuoteError(format!(
                        "No quote for held symbol: {}",
                        holding.symbol
                    ))
                })?;

            let value = quote.price * Decimal::from(holding.shares);
            total += value;
            positions.push(PortfolioPosition {
                symbol: holding.symbol,
                name: quote.name,
                shares: holding.shares,
                price: quote.price,
                value,
            });
        }

        // 3. 加上现金
        let cash = self.user_store.get_cash(user_id).await?;
        total += cash;

        Ok(PortfolioView {
            positions,
            cash,
            total,
        })
    }

    /// 获取交易历史（最新在前）
    pub async fn get_history(&self, user_id: Uuid) -> BrokerageResult<Vec<TradeRecord>> {
        self.trade_store.list_for_user(user_id).await
    }
}
