//! 基础设施层：存储连接与日志

#[cfg(feature = "database")]
pub mod database;
pub mod logger;

use std::sync::Arc;

use crate::app::users::{MemoryUserStore, UserStore};
use crate::config::{DatabaseConfig, StoreBackend};
use crate::core::error::AppError;

/// 按配置创建存储句柄，进程启动时调用一次
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn UserStore>, AppError> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryUserStore::new())),
        StoreBackend::Postgres => open_postgres(config).await,
    }
}

#[cfg(feature = "database")]
async fn open_postgres(config: &DatabaseConfig) -> Result<Arc<dyn UserStore>, AppError> {
    let manager = database::DatabaseManager::new(config).await?;
    manager.ensure_schema().await?;
    Ok(Arc::new(manager.into_store()))
}

#[cfg(not(feature = "database"))]
async fn open_postgres(_config: &DatabaseConfig) -> Result<Arc<dyn UserStore>, AppError> {
    Err(AppError::Unavailable(
        "postgres backend requires the `database` feature".to_string(),
    ))
}
