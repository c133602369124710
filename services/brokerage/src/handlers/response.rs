use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_protocols::http::{ApiError, ApiResponse};

use crate::models::BrokerageError;

/// 成功响应
pub fn success_response<T: serde::Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 业务错误响应
pub fn error_response(err: &BrokerageError) -> Response {
    let (status, code) = classify(err);
    let error = ApiError::new(code, &err.to_string());
    (status, Json(ApiResponse::<()>::error(error))).into_response()
}

/// 错误到HTTP状态码与错误码的映射
fn classify(err: &BrokerageError) -> (StatusCode, &'static str) {
    match err {
        BrokerageError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        BrokerageError::InvalidSymbol(_) => (StatusCode::BAD_REQUEST, "INVALID_SYMBOL"),
        BrokerageError::UnknownSymbol(_) => (StatusCode::BAD_REQUEST, "SYMBOL_NOT_FOUND"),
        BrokerageError::InsufficientCash { .. } => (StatusCode::BAD_REQUEST, "INSUFFICIENT_CASH"),
        BrokerageError::InsufficientShares { .. } => {
            (StatusCode::BAD_REQUEST, "INSUFFICIENT_SHARES")
        }
        BrokerageError::UsernameTaken(_) => (StatusCode::BAD_REQUEST, "USERNAME_TAKEN"),
        BrokerageError::InvalidCredentials => (StatusCode::FORBIDDEN, "INVALID_CREDENTIALS"),
        BrokerageError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        BrokerageError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        BrokerageError::QuoteError(_) => (StatusCode::BAD_GATEWAY, "QUOTE_SOURCE_ERROR"),
        BrokerageError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symbol;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                BrokerageError::InvalidRequest("Symbol is required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                BrokerageError::UnknownSymbol(Symbol::parse("ZZZZ").unwrap()),
                StatusCode::BAD_REQUEST,
            ),
            (
                BrokerageError::InsufficientCash {
                    required: dec!(100),
                    available: dec!(50),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                BrokerageError::InsufficientShares {
                    requested: 5,
                    owned: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (BrokerageError::InvalidCredentials, StatusCode::FORBIDDEN),
            (
                BrokerageError::UserNotFound(Uuid::new_v4()),
                StatusCode::NOT_FOUND,
            ),
            (
                BrokerageError::DatabaseError("connection reset".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = classify(&err);
            assert_eq!(status, expected, "wrong status for {:?}", err);
        }
    }
}
