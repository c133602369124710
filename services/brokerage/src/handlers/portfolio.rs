use axum::{extract::State, response::Response, Extension};
use tracing::error;

use crate::handlers::response::{error_response, success_response};
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// 投资组合首页
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Response {
    match state.portfolio_service.get_portfolio(user.user_id).await {
        Ok(portfolio) => success_response(portfolio),
        Err(err) => {
            error!("Failed to load portfolio for {}: {}", user.user_id, err);
            error_response(&err)
        }
    }
}
