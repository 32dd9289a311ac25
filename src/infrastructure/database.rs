//! 数据库基础设施：PostgreSQL 连接池与用户存储实现

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use crate::app::users::{NewUser, User, UserStore};
use crate::config::{redact_url, DatabaseConfig};
use crate::core::error::AppError;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        user_id BIGINT NOT NULL UNIQUE,
        email TEXT NOT NULL CHECK (email <> ''),
        username TEXT
    )
"#;

const USER_COLUMNS: &str = "id, user_id, email, username";

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| AppError::Unavailable("database url is not configured".to_string()))?;

        info!("连接数据库: {}", redact_url(url));

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// 创建 users 表（已存在时不做任何修改）
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        info!("users 表已就绪");
        Ok(())
    }

    pub fn into_store(self) -> PgUserStore {
        PgUserStore::new(self.pool)
    }
}

/// 基于 PostgreSQL 的用户存储
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, user_id, email, username) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(user.user_id)
        .bind(&user.email)
        .bind(&user.username)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn replace(&self, id: Uuid, user: NewUser) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET user_id = $2, email = $3, username = $4 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(user.user_id)
        .bind(&user.email)
        .bind(&user.username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
