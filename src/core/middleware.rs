//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info};

/// 请求日志中间件：记录方法、路径、状态码和耗时
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if let Some(user_agent) = req.headers().get("user-agent").and_then(|h| h.to_str().ok()) {
        debug!(%method, %path, user_agent, "收到请求");
    }

    let response = next.run(req).await;
    let status = response.status();

    info!(
        %method,
        %path,
        status = status.as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "{} {} - {}",
        method,
        path,
        status
    );

    response
}
