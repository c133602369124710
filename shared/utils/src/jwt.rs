use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户ID
    pub username: String,
    pub iat: usize,  // 签发时间
    pub exp: usize,  // 过期时间
    pub iss: String, // 签发者
    pub aud: String, // 受众
}

/// JWT服务
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    expiry_secs: u64,
}

impl JwtService {
    pub fn new(secret: &str, issuer: &str, audience: &str, expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            expiry_secs,
        }
    }

    /// 生成会话令牌
    pub fn generate_session_token(&self, user_id: &str, username: &str) -> Result<String> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + self.expiry_secs as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// 验证令牌并返回Claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", "brokerage", "brokerage-users", 3600)
    }

    #[test]
    fn test_token_round_trip() {
        let service = service();
        let token = service.generate_session_token("user-1", "alice").unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let service = service();
        let other = JwtService::new("other-secret", "brokerage", "brokerage-users", 3600);

        let token = service.generate_session_token("user-1", "alice").unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_rejected_with_wrong_issuer() {
        let service = service();
        let other = JwtService::new("test-secret", "someone-else", "brokerage-users", 3600);

        let token = service.generate_session_token("user-1", "alice").unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let now = Utc::now().timestamp() as usize;

        // 过期时间在一小时前，超出默认容差
        let claims = Claims {
            sub: "user-1".to_string(),
            username: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            iss: "brokerage".to_string(),
            aud: "brokerage-users".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.verify_token(&token).is_err());
    }
}
