use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde_json::json;
use tracing::{error, info, warn};

use shared_models::{LoginRequest, RegisterRequest};

use crate::handlers::response::{error_response, success_response};
use crate::middleware::session::SESSION_COOKIE;
use crate::state::AppState;

/// 注册处理器
///
/// 注册成功后直接建立会话
pub async fn register(
    State(state): State<AppState>,
    Form(request): Form<RegisterRequest>,
) -> Response {
    match state.account_service.register(request).await {
        Ok(user) => {
            let token = match state
                .jwt_service
                .generate_session_token(&user.id.to_string(), &user.username)
            {
                Ok(token) => token,
                Err(e) => {
                    error!("Failed to issue session token: {}", e);
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            };

            with_session_cookie(
                success_response(user.view()),
                &token,
                state.config.auth.session_ttl_secs,
            )
        }
        Err(err) => {
            warn!("Registration rejected: {}", err);
            error_response(&err)
        }
    }
}

/// 登录处理器
pub async fn login(State(state): State<AppState>, Form(request): Form<LoginRequest>) -> Response {
    let username = request.username.clone();

    match state.account_service.authenticate(request).await {
        Ok(user) => {
            let token = match state
                .jwt_service
                .generate_session_token(&user.id.to_string(), &user.username)
            {
                Ok(token) => token,
                Err(e) => {
                    error!("Failed to issue session token: {}", e);
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            };

            info!("User logged in: {}", user.username);
            let _ = state
                .metrics
                .collector()
                .inc_counter_vec("user_login_total", &["success"]);

            with_session_cookie(
                success_response(user.view()),
                &token,
                state.config.auth.session_ttl_secs,
            )
        }
        Err(err) => {
            warn!("Login failed for {}: {}", username, err);
            let _ = state
                .metrics
                .collector()
                .inc_counter_vec("user_login_total", &["failure"]);
            error_response(&err)
        }
    }
}

/// 登出处理器
pub async fn logout() -> Response {
    info!("User logged out");
    clear_session_cookie(success_response(json!({
        "message": "Successfully logged out"
    })))
}

/// 设置会话cookie
fn with_session_cookie(mut response: Response, token: &str, max_age_secs: u64) -> Response {
    let cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE, token, max_age_secs
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

/// 清除会话cookie
fn clear_session_cookie(mut response: Response) -> Response {
    let cookie = format!(
        "{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax",
        SESSION_COOKIE
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}
