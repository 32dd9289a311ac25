//! 核心响应处理模块

use axum::{
    response::{IntoResponse, Response},
    Json,
};

/// 写操作成功后的固定确认信息
///
/// 响应体是一个 JSON 字符串，不包含记录本身或其标识符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Added,
    Updated,
    Deleted,
}

impl Ack {
    pub fn message(self) -> &'static str {
        match self {
            Ack::Added => "User added!",
            Ack::Updated => "User updated!",
            Ack::Deleted => "User deleted.",
        }
    }
}

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        Json(self.message()).into_response()
    }
}
