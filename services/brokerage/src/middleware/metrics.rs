use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

use crate::state::AppState;

/// 指标中间件处理函数
pub async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    // 执行请求
    let response = next.run(request).await;

    // 记录HTTP请求指标
    let duration = start_time.elapsed();
    let status_code = response.status().as_u16();

    let _ = state
        .metrics
        .record_http_request(&method, &path, status_code, duration);

    // 记录访问日志
    info!(
        method = %method,
        path = %path,
        status = %status_code,
        duration_ms = %duration.as_millis(),
        "HTTP request completed"
    );

    response
}
