//! PostgreSQL 存储测试，需要设置 TEST_DATABASE_URL，未设置时跳过

#![cfg(feature = "database")]

use user_api::{
    config::DatabaseConfig,
    infrastructure::database::{DatabaseManager, PgUserStore},
    AppError, NewUser, UserStore,
};
use uuid::Uuid;

async fn test_store() -> Option<PgUserStore> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL 未设置，跳过 PostgreSQL 测试");
        return None;
    };

    let config = DatabaseConfig {
        url: Some(url),
        max_connections: 2,
        ..DatabaseConfig::default()
    };
    let manager = DatabaseManager::new(&config).await.unwrap();
    manager.ensure_schema().await.unwrap();
    Some(manager.into_store())
}

/// 每个测试使用不同的业务 ID，避免共享数据库中的冲突
fn unique_user_id() -> i64 {
    (Uuid::new_v4().as_u128() >> 66) as i64
}

#[tokio::test]
async fn test_insert_find_delete() {
    let Some(store) = test_store().await else {
        return;
    };
    let user_id = unique_user_id();

    let user = store
        .insert(NewUser::new(user_id, "pg@x.com", Some("pg")))
        .await
        .unwrap();
    assert_eq!(store.find(user.id).await.unwrap(), Some(user.clone()));
    assert!(store.list().await.unwrap().contains(&user));

    assert_eq!(store.delete(user.id).await.unwrap(), Some(user.clone()));
    assert_eq!(store.delete(user.id).await.unwrap(), None);
    assert_eq!(store.find(user.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_user_id_conflicts() {
    let Some(store) = test_store().await else {
        return;
    };
    let user_id = unique_user_id();

    let user = store
        .insert(NewUser::new(user_id, "a@x.com", None))
        .await
        .unwrap();
    let result = store.insert(NewUser::new(user_id, "b@x.com", None)).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    store.delete(user.id).await.unwrap();
}

#[tokio::test]
async fn test_replace() {
    let Some(store) = test_store().await else {
        return;
    };
    let user = store
        .insert(NewUser::new(unique_user_id(), "a@x.com", Some("a")))
        .await
        .unwrap();
    let new_user_id = unique_user_id();

    let replaced = store
        .replace(user.id, NewUser::new(new_user_id, "b@x.com", None))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.id, user.id);
    assert_eq!(replaced.user_id, new_user_id);
    assert_eq!(replaced.username, None);

    let missing = store
        .replace(Uuid::new_v4(), NewUser::new(unique_user_id(), "c@x.com", None))
        .await
        .unwrap();
    assert!(missing.is_none());

    store.delete(user.id).await.unwrap();
}

#[tokio::test]
async fn test_empty_email_violates_check() {
    let Some(store) = test_store().await else {
        return;
    };

    let result = store.insert(NewUser::new(unique_user_id(), "", None)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}
