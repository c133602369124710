use axum::{extract::State, response::Response, Extension};
use tracing::error;

use crate::handlers::response::{error_response, success_response};
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// 交易历史
pub async fn history(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Response {
    match state.portfolio_service.get_history(user.user_id).await {
        Ok(trades) => success_response(trades),
        Err(err) => {
            error!("Failed to load history for {}: {}", user.user_id, err);
            error_response(&err)
        }
    }
}
