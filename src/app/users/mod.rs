//! 用户管理：`/api/users` 下的增删改查接口

pub mod handler;
pub mod model;
pub mod service;
pub mod store;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use handler::AppState;

pub use model::{NewUser, User, UserPayload};
pub use service::UserService;
pub use store::{MemoryUserStore, UserStore};

/// 路由前缀
pub const BASE_PATH: &str = "/api/users";

pub fn routes() -> Router<AppState> {
    let unmatched = handler::unmatched;

    Router::new()
        .route(BASE_PATH, get(handler::list_users).fallback(unmatched))
        .route(
            &format!("{}/", BASE_PATH),
            get(handler::list_users).fallback(unmatched),
        )
        .route(
            &format!("{}/add", BASE_PATH),
            post(handler::add_user).fallback(unmatched),
        )
        .route(
            &format!("{}/update/:id", BASE_PATH),
            put(handler::update_user).fallback(unmatched),
        )
        .route(
            &format!("{}/delete/:id", BASE_PATH),
            delete(handler::delete_user).fallback(unmatched),
        )
        .route(
            &format!("{}/:id", BASE_PATH),
            get(handler::get_user).fallback(unmatched),
        )
        .fallback(unmatched)
}
