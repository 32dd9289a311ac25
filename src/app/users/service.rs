//! 用户业务服务

use std::sync::Arc;

use tracing::{debug, info};

use super::model::{parse_record_id, NewUser, User, UserPayload};
use super::store::UserStore;
use crate::core::error::AppError;

/// 每个操作对应一次存储调用
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = self.store.list().await?;
        debug!(count = users.len(), "查询用户列表");
        Ok(users)
    }

    /// 按记录标识符查询，找不到时返回 `None` 而不是错误
    pub async fn get_user(&self, raw_id: &str) -> Result<Option<User>, AppError> {
        let id = parse_record_id(raw_id)?;
        let user = self.store.find(id).await?;
        debug!(%id, found = user.is_some(), "查询用户");
        Ok(user)
    }

    pub async fn add_user(&self, payload: UserPayload) -> Result<User, AppError> {
        let new_user = NewUser::try_from(payload)?;
        let user = self.store.insert(new_user).await?;
        info!(id = %user.id, user_id = user.user_id, "用户已创建");
        Ok(user)
    }

    /// 整体替换记录的三个字段
    pub async fn update_user(&self, raw_id: &str, payload: UserPayload) -> Result<User, AppError> {
        let id = parse_record_id(raw_id)?;
        let new_user = NewUser::try_from(payload)?;

        let user = self
            .store
            .replace(id, new_user)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no user with identifier {}", id)))?;
        info!(%id, user_id = user.user_id, "用户已更新");
        Ok(user)
    }

    /// 删除记录；记录不存在也视为成功
    pub async fn delete_user(&self, raw_id: &str) -> Result<(), AppError> {
        let id = parse_record_id(raw_id)?;
        let deleted = self.store.delete(id).await?;
        info!(%id, existed = deleted.is_some(), "用户已删除");
        Ok(())
    }
}
