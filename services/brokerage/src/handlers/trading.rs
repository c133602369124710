use axum::{extract::State, response::Response, Extension, Form};
use tracing::warn;

use crate::handlers::response::{error_response, success_response};
use crate::middleware::session::SessionUser;
use crate::models::TradeRequest;
use crate::state::AppState;

/// 买入处理器
pub async fn buy(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(request): Form<TradeRequest>,
) -> Response {
    match state.trading_service.buy(user.user_id, request).await {
        Ok(trade) => {
            let _ = state
                .metrics
                .collector()
                .inc_counter_vec("trades_total", &["buy"]);
            success_response(trade)
        }
        Err(err) => {
            warn!("Buy rejected for {}: {}", user.user_id, err);
            error_response(&err)
        }
    }
}

/// 卖出处理器
pub async fn sell(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(request): Form<TradeRequest>,
) -> Response {
    match state.trading_service.sell(user.user_id, request).await {
        Ok(trade) => {
            let _ = state
                .metrics
                .collector()
                .inc_counter_vec("trades_total", &["sell"]);
            success_response(trade)
        }
        Err(err) => {
            warn!("Sell rejected for {}: {}", user.user_id, err);
            error_response(&err)
        }
    }
}

/// 当前可卖出的代码列表
pub async fn sellable(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Response {
    match state.trading_service.sellable_symbols(user.user_id).await {
        Ok(symbols) => success_response(symbols),
        Err(err) => {
            warn!("Failed to list sellable symbols for {}: {}", user.user_id, err);
            error_response(&err)
        }
    }
}
