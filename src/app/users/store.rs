//! 用户存储接口及内存实现

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{NewUser, User};
use crate::core::error::AppError;

/// 用户持久化接口
///
/// 业务 `ID` 的唯一性由存储实现保证，应用层写入前不做检查。
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 按存储的自然顺序返回全部用户
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// 写入新记录并分配记录标识符
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// 以单次原子操作整体替换记录字段，记录不存在时返回 `None`
    async fn replace(&self, id: Uuid, user: NewUser) -> Result<Option<User>, AppError>;

    /// 删除记录并返回被删除的记录，记录不存在时返回 `None`
    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError>;

    fn backend(&self) -> &'static str;
}

/// 进程内存储，按插入顺序保存记录
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_key(user_id: i64) -> AppError {
    AppError::Conflict(format!("duplicate key: ID {} already exists", user_id))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|existing| existing.user_id == user.user_id) {
            return Err(duplicate_key(user.user_id));
        }

        let user = user.into_user(Uuid::new_v4());
        users.push(user.clone());
        Ok(user)
    }

    async fn replace(&self, id: Uuid, user: NewUser) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;

        let Some(index) = users.iter().position(|existing| existing.id == id) else {
            return Ok(None);
        };

        if users
            .iter()
            .any(|existing| existing.id != id && existing.user_id == user.user_id)
        {
            return Err(duplicate_key(user.user_id));
        }

        let user = user.into_user(id);
        users[index] = user.clone();
        Ok(Some(user))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|existing| existing.id == id)
            .map(|index| users.remove(index)))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let store = MemoryUserStore::new();
        let first = store.insert(NewUser::new(2, "b@x.com", None)).await.unwrap();
        let second = store.insert(NewUser::new(1, "a@x.com", Some("a"))).await.unwrap();

        let users = store.list().await.unwrap();
        assert_eq!(users, vec![first, second]);
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let store = MemoryUserStore::new();
        store.insert(NewUser::new(1, "a@x.com", None)).await.unwrap();

        let result = store.insert(NewUser::new(1, "other@x.com", None)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace() {
        let store = MemoryUserStore::new();
        let user = store.insert(NewUser::new(1, "a@x.com", Some("a"))).await.unwrap();

        let replaced = store
            .replace(user.id, NewUser::new(2, "b@x.com", None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.id, user.id);
        assert_eq!(replaced.user_id, 2);
        assert_eq!(replaced.username, None);
        assert_eq!(store.find(user.id).await.unwrap(), Some(replaced));

        let missing = store
            .replace(Uuid::new_v4(), NewUser::new(3, "c@x.com", None))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_replace_keeping_own_id_is_not_a_conflict() {
        let store = MemoryUserStore::new();
        let user = store.insert(NewUser::new(1, "a@x.com", None)).await.unwrap();
        let other = store.insert(NewUser::new(2, "b@x.com", None)).await.unwrap();

        assert!(store
            .replace(user.id, NewUser::new(1, "new@x.com", None))
            .await
            .is_ok());

        let result = store.replace(other.id, NewUser::new(1, "b@x.com", None)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryUserStore::new();
        let user = store.insert(NewUser::new(1, "a@x.com", None)).await.unwrap();

        assert_eq!(store.delete(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.delete(user.id).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }
}
