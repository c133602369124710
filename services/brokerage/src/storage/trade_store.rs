use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Amount, BrokerageError, BrokerageResult, Holding, Symbol, TradeRecord};

/// 交易流水存储
#[derive(Clone)]
pub struct TradeStore {
    pool: Arc<PgPool>,
}

impl TradeStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// 记录一笔交易并同步调整现金余额
    ///
    /// 流水插入与现金变更在同一个数据库事务内提交
    pub async fn record_trade(&self, trade: &TradeRecord, cash_delta: Amount) -> BrokerageResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        let insert = r#"
            INSERT INTO transactions (id, user_id, symbol, shares, price, executed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(insert)
            .bind(trade.id)
            .bind(trade.user_id)
            .bind(trade.symbol.as_str())
            .bind(trade.shares)
            .bind(trade.price)
            .bind(trade.executed_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        let update = r#"
            UPDATE users SET cash = cash + $2 WHERE id = $1
        "#;

        let result = sqlx::query(update)
            .bind(trade.user_id)
            .bind(cash_delta)
            .execute(&mut *tx)
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BrokerageError::UserNotFound(trade.user_id));
        }

        tx.commit()
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 查询用户在某代码上的净持仓股数
    pub async fn holding_shares(&self, user_id: Uuid, symbol: &Symbol) -> BrokerageResult<i64> {
        let query = r#"
            SELECT COALESCE(SUM(shares), 0)::BIGINT AS shares
            FROM transactions
            WHERE user_id = $1 AND symbol = $2
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(symbol.as_str())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        Ok(row.get("shares"))
    }

    /// 查询用户当前持仓列表（净股数大于0）
    pub async fn list_holdings(&self, user_id: Uuid) -> BrokerageResult<Vec<Holding>> {
        let query = r#"
            SELECT symbol, SUM(shares)::BIGINT AS shares
            FROM transactions
            WHERE user_id = $1
            GROUP BY symbol
            HAVING SUM(shares) > 0
            ORDER BY symbol
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        let mut holdings = Vec::with_capacity(rows.len());
        for row in rows {
            let symbol_str: String = row.get("symbol");
            let symbol = Symbol::parse(&symbol_str).ok_or_else(|| {
                BrokerageError::DatabaseError(format!("Invalid symbol in ledger: {}", symbol_str))
            })?;
            holdings.push(Holding {
                symbol,
                shares: row.get("shares"),
            });
        }

        Ok(holdings)
    }

    /// 查询用户全部交易历史（最新在前）
    pub async fn list_for_user(&self, user_id: Uuid) -> BrokerageResult<Vec<TradeRecord>> {
        let query = r#"
            SELECT * FROM transactions
            WHERE user_id = $1
            ORDER BY executed_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        let mut trades = Vec::with_capacity(rows.len());
        for row in rows {
            trades.push(self.row_to_trade(row)?);
        }

        Ok(trades)
    }

    /// 将数据库行转换为交易记录
    fn row_to_trade(&self, row: sqlx::postgres::PgRow) -> BrokerageResult<TradeRecord> {
        let symbol_str: String = row.get("symbol");
        let symbol = Symbol::parse(&symbol_str).ok_or_else(|| {
            BrokerageError::DatabaseError(format!("Invalid symbol in ledger: {}", symbol_str))
        })?;

        Ok(TradeRecord {
            id: row.get("id"),
            user_id: row.get("user_id"),
            symbol,
            shares: row.get("shares"),
            price: row.get("price"),
            executed_at: row.get("executed_at"),
        })
    }
}
