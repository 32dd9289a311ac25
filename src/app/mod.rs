//! 应用层

pub mod users;

use std::sync::Arc;

use axum::{error_handling::HandleErrorLayer, middleware, Router};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::core::middleware::request_logging_middleware;
use users::{
    handler::{handle_middleware_error, AppState},
    UserService, UserStore,
};

/// 组装路由；存储句柄在启动时创建后注入
pub fn build_router(store: Arc<dyn UserStore>, server: &ServerConfig) -> Router {
    let state = AppState {
        user_service: UserService::new(store),
    };

    let router = users::routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(middleware::from_fn(request_logging_middleware)),
    );

    // 超时也以错误字符串返回
    match server.request_timeout() {
        Some(timeout) => router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout)),
        ),
        None => router,
    }
}
