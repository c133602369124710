use axum::{
    extract::{Query, State},
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::handlers::response::{error_response, success_response};
use crate::models::{BrokerageError, Symbol};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub symbol: Option<String>,
}

/// 报价查询处理器（GET）
pub async fn quote_get(State(state): State<AppState>, Query(params): Query<QuoteParams>) -> Response {
    lookup(&state, params.symbol.unwrap_or_default()).await
}

/// 报价查询处理器（POST表单）
pub async fn quote_post(State(state): State<AppState>, Form(params): Form<QuoteParams>) -> Response {
    lookup(&state, params.symbol.unwrap_or_default()).await
}

async fn lookup(state: &AppState, raw: String) -> Response {
    if raw.trim().is_empty() {
        return error_response(&BrokerageError::InvalidRequest(
            "Symbol is required".to_string(),
        ));
    }

    let symbol = match Symbol::parse(&raw) {
        Some(symbol) => symbol,
        None => return error_response(&BrokerageError::InvalidSymbol(raw)),
    };

    match state.quote_source.lookup(&symbol).await {
        Ok(Some(quote)) => success_response(quote),
        Ok(None) => error_response(&BrokerageError::UnknownSymbol(symbol)),
        Err(e) => error_response(&BrokerageError::QuoteError(e.to_string())),
    }
}
