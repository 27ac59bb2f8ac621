use crate::domain::entities::{Contact, ContactSearchParams};
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

/// Every operation is scoped to the owning user.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(&self, contact: &Contact) -> ApiResult<()>;
    async fn get_contact(&self, user_id: &str, contact_id: &str) -> ApiResult<Option<Contact>>;
    async fn list_contacts(&self, user_id: &str, limit: i64, offset: i64)
        -> ApiResult<Vec<Contact>>;
    async fn list_all_contacts(&self, user_id: &str) -> ApiResult<Vec<Contact>>;
    async fn update_contact(&self, contact: &Contact) -> ApiResult<()>;
    async fn delete_contact(&self, user_id: &str, contact_id: &str) -> ApiResult<bool>;
    async fn search_contacts(
        &self,
        user_id: &str,
        params: &ContactSearchParams,
    ) -> ApiResult<Vec<Contact>>;
}
