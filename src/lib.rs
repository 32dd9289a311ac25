//! # 用户管理 API
//!
//! 在 `/api/users` 下提供单一用户记录类型的增删改查接口：
//! - 应用层：路由、处理器、业务服务和存储接口
//! - 核心层：错误类型、固定确认响应、请求日志中间件
//! - 基础设施层：PostgreSQL 存储实现和日志初始化

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::build_router;
pub use app::users::{MemoryUserStore, NewUser, User, UserPayload, UserStore};
pub use config::AppConfig;
pub use crate::core::error::AppError;
pub use infrastructure::open_store;
