use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Amount, BrokerageError, BrokerageResult};
use crate::storage::UserStore;
use shared_models::{LoginRequest, RegisterRequest, User};

/// 账户服务
#[derive(Clone)]
pub struct AccountService {
    user_store: Arc<UserStore>,
    initial_cash: Amount,
}

impl AccountService {
    pub fn new(user_store: Arc<UserStore>, initial_cash: Amount) -> Self {
        Self {
            user_store,
            initial_cash,
        }
    }

    /// 注册新用户
    pub async fn register(&self, request: RegisterRequest) -> BrokerageResult<User> {
        // 1. 校验输入
        let username = request.username.trim();
        if username.is_empty() {
            return Err(BrokerageError::InvalidRequest(
                "Username is required".to_string(),
            ));
        }
        if request.password.is_empty() {
            return Err(BrokerageError::InvalidRequest(
                "Password is required".to_string(),
            ));
        }
        if request.confirmation.is_empty() {
            return Err(BrokerageError::InvalidRequest(
                "Password confirmation is required".to_string(),
            ));
        }
        if request.password != request.confirmation {
            return Err(BrokerageError::InvalidRequest(
                "Passwords do not match".to_string(),
            ));
        }

        // 2. 检查用户名是否已被占用
        if self.user_store.get_by_username(username).await?.is_some() {
            return Err(BrokerageError::UsernameTaken(username.to_string()));
        }

        // 3. 散列口令并落库，唯一索引兜底并发注册
        let password_hash = hash_password(&request.password)?;
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            cash: self.initial_cash,
            created_at: Utc::now(),
        };
        self.user_store.create_user(&user).await?;

        tracing::info!("User registered: {}", user.username);

        Ok(user)
    }

    /// 验证用户凭据
    pub async fn authenticate(&self, request: LoginRequest) -> BrokerageResult<User> {
        if request.username.trim().is_empty() {
            return Err(BrokerageError::InvalidRequest(
                "Username is required".to_string(),
            ));
        }
        if request.password.is_empty() {
            return Err(BrokerageError::InvalidRequest(
                "Password is required".to_string(),
            ));
        }

        let user = match self.user_store.get_by_username(request.username.trim()).await? {
            Some(user) => user,
            None => return Err(BrokerageError::InvalidCredentials),
        };

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(BrokerageError::InvalidCredentials);
        }

        Ok(user)
    }
}

/// 散列口令
fn hash_password(password: &str) -> BrokerageResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| BrokerageError::InternalError(format!("Password hashing failed: {}", e)))
}

/// 校验口令
fn verify_password(password: &str, hash: &str) -> BrokerageResult<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| BrokerageError::InternalError(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        // 相同口令每次散列结果不同
        assert_ne!(first, second);
    }
}
