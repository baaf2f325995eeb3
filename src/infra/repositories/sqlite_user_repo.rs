use crate::domain::{models::user::{Role, User}, ports::UserRepository};
use crate::error::AppError;
use crate::infra::repositories::records::{convert_all, UserRecord};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn find_by_id(&self, uid: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, UserRecord>("SELECT uid, email, display_name, role, created_at FROM users WHERE uid = ?")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(User::try_from)
            .transpose()
    }

    async fn create_if_absent(&self, user: &User) -> Result<User, AppError> {
        sqlx::query(
            "INSERT INTO users (uid, email, display_name, role, created_at) VALUES (?, ?, ?, ?, ?) ON CONFLICT(uid) DO NOTHING",
        )
            .bind(&user.uid)
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        self.find_by_id(&user.uid).await?
            .ok_or_else(|| AppError::InternalWithMsg(format!("User {} vanished after insert", user.uid)))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRecord>(
            "SELECT uid, email, display_name, role, created_at FROM users ORDER BY email ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn update_role(&self, uid: &str, role: Role) -> Result<User, AppError> {
        sqlx::query_as::<_, UserRecord>(
            "UPDATE users SET role = ? WHERE uid = ? RETURNING uid, email, display_name, role, created_at"
        )
            .bind(role.as_str())
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?
            .try_into()
    }
}
