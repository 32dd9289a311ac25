//! 用户接口处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, Uri},
    response::Json,
    BoxError,
};

use super::{
    model::{User, UserPayload},
    service::UserService,
};
use crate::core::{error::AppError, response::Ack};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

fn body(payload: Result<Json<UserPayload>, JsonRejection>) -> Result<UserPayload, AppError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<User>>, AppError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(user))
}

pub async fn add_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Ack, AppError> {
    state.user_service.add_user(body(payload)?).await?;
    Ok(Ack::Added)
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Ack, AppError> {
    state.user_service.update_user(&id, body(payload)?).await?;
    Ok(Ack::Updated)
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Ack, AppError> {
    state.user_service.delete_user(&id).await?;
    Ok(Ack::Deleted)
}

/// 没有匹配的路径或方法时同样返回错误字符串
pub async fn unmatched(method: Method, uri: Uri) -> AppError {
    AppError::Validation(format!("no route for {} {}", method, uri.path()))
}

/// 请求超时等中间件错误
pub async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Unavailable("request timed out".to_string())
    } else {
        AppError::Storage(err.to_string())
    }
}
