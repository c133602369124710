use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::AppState;

/// 会话cookie名称
pub const SESSION_COOKIE: &str = "session";

/// 会话中间件处理函数
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = request.uri().path();

    // 检查是否为公开路径
    if state.config.is_public_path(path) {
        debug!("Public path accessed: {}", path);
        return Ok(next.run(request).await);
    }

    // 提取会话cookie
    let token = match extract_session_cookie(request.headers()) {
        Some(token) => token,
        None => {
            warn!("Missing session cookie for path: {}", path);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    // 验证会话令牌
    let claims = match state.jwt_service.verify_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Invalid session token: {}", e);
            let _ = state
                .metrics
                .collector()
                .inc_counter_vec("auth_requests_total", &["failure"]);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let user_id = match claims.sub.parse::<Uuid>() {
        Ok(id) => id,
        Err(_) => {
            warn!("Malformed user id in session token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    // 将会话用户写入请求扩展
    request.extensions_mut().insert(SessionUser {
        user_id,
        username: claims.username.clone(),
    });

    debug!("Session authenticated: {} ({})", claims.username, user_id);

    let _ = state
        .metrics
        .collector()
        .inc_counter_vec("auth_requests_total", &["success"]);

    Ok(next.run(request).await)
}

/// 从Cookie头中提取会话令牌
fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("cookie")?.to_str().ok()?;

    for pair in cookie_header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(name), Some(value)) if name == SESSION_COOKIE && !value.is_empty() => {
                return Some(value.to_string());
            }
            _ => {}
        }
    }

    None
}

/// 会话用户
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
}
