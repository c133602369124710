use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Amount, BrokerageError, BrokerageResult};
use shared_models::User;

/// 用户存储
#[derive(Clone)]
pub struct UserStore {
    pool: Arc<PgPool>,
}

impl UserStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// 创建用户
    pub async fn create_user(&self, user: &User) -> BrokerageResult<()> {
        let query = r#"
            INSERT INTO users (id, username, password_hash, cash, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.cash)
            .bind(user.created_at)
            .execute(&*self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    BrokerageError::UsernameTaken(user.username.clone())
                }
                _ => BrokerageError::DatabaseError(e.to_string()),
            })?;

        Ok(())
    }

    /// 按用户名查询用户
    pub async fn get_by_username(&self, username: &str) -> BrokerageResult<Option<User>> {
        let query = r#"
            SELECT * FROM users WHERE username = $1
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?;

        if let Some(row) = row {
            Ok(Some(self.row_to_user(row)?))
        } else {
            Ok(None)
        }
    }

    /// 查询现金余额
    pub async fn get_cash(&self, user_id: Uuid) -> BrokerageResult<Amount> {
        let query = r#"
            SELECT cash FROM users WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| BrokerageError::DatabaseError(e.to_string()))?
            .ok_or(BrokerageError::UserNotFound(user_id))?;

        Ok(row.get("cash"))
    }

    /// 将数据库行转换为用户对象
    fn row_to_user(&self, row: sqlx::postgres::PgRow) -> BrokerageResult<User> {
        Ok(User {
            id: row.get("id"),
            username: row.get("username"),
            password_hash: row.get("password_hash"),
            cash: row.get("cash"),
            created_at: row.get("created_at"),
        })
    }
}
