use crate::domain::entities::User;
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> ApiResult<()>;
    async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> ApiResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> ApiResult<Option<User>>;
    async fn get_user_by_refresh_token(&self, token: &str) -> ApiResult<Option<User>>;
    /// `None` clears the stored refresh token.
    async fn update_refresh_token(
        &self,
        user_id: &str,
        token: Option<&str>,
        expires_at: Option<&str>,
    ) -> ApiResult<()>;
}
