use crate::domain::entities::User;
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

const USER_COLUMNS: &str = "id, username, email, password_hash, avatar, refresh_token, \
     refresh_token_expires_at, created_at, updated_at";

fn user_from_row(row: &AnyRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        // NULL columns come back as errors through the Any driver
        avatar: row.try_get("avatar").ok(),
        refresh_token: row.try_get("refresh_token").ok(),
        refresh_token_expires_at: row.try_get("refresh_token_expires_at").ok(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    async fn find_user_by(&self, column: &str, value: &str) -> ApiResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, column);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for Database {
    async fn create_user(&self, user: &User) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, avatar, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>> {
        self.find_user_by("id", id).await
    }

    async fn get_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        self.find_user_by("email", email).await
    }

    async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        self.find_user_by("username", username).await
    }

    async fn get_user_by_refresh_token(&self, token: &str) -> ApiResult<Option<User>> {
        self.find_user_by("refresh_token", token).await
    }

    async fn update_refresh_token(
        &self,
        user_id: &str,
        token: Option<&str>,
        expires_at: Option<&str>,
    ) -> ApiResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "UPDATE users
             SET refresh_token = ?, refresh_token_expires_at = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(token)
        .bind(expires_at)
        .bind(&now)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
