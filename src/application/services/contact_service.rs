use crate::domain::entities::*;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::contact_repository::ContactRepository;
use crate::domain::services::birthday_reminder::{self, Reminder, DEFAULT_WINDOW_DAYS};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AuthenticatedUser};
use crate::shared::utils::email_validator::validate_and_normalize_email;
use std::sync::Arc;

const MIN_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 500;

#[derive(Clone)]
pub struct ContactService {
    contact_repo: Arc<dyn ContactRepository>,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    pub fn new(contact_repo: Arc<dyn ContactRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            contact_repo,
            clock,
        }
    }

    /// Create a new contact owned by the caller
    pub async fn create_contact(
        &self,
        auth_user: &AuthenticatedUser,
        request: ContactRequest,
    ) -> ApiResult<ContactResponse> {
        let request = normalize(request)?;

        let contact = Contact::new(auth_user.user_id().to_string(), request);
        self.contact_repo.create_contact(&contact).await?;

        metrics::counter!("contacts_created_total").increment(1);
        tracing::info!("User {} created contact {}", contact.user_id, contact.id);

        Ok(respond(auth_user, contact))
    }

    /// Get a contact by ID
    pub async fn get_contact(
        &self,
        auth_user: &AuthenticatedUser,
        id: &str,
    ) -> ApiResult<ContactResponse> {
        let contact = self.find_owned(auth_user, id).await?;
        Ok(respond(auth_user, contact))
    }

    /// List contacts with limit/offset pagination
    pub async fn list_contacts(
        &self,
        auth_user: &AuthenticatedUser,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<ContactResponse>> {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ApiError::BadRequest(format!(
                "limit must be between {} and {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE
            )));
        }
        if offset < 0 {
            return Err(ApiError::BadRequest(
                "offset must be non-negative".to_string(),
            ));
        }

        let contacts = self
            .contact_repo
            .list_contacts(auth_user.user_id(), limit, offset)
            .await?;

        Ok(contacts
            .into_iter()
            .map(|contact| respond(auth_user, contact))
            .collect())
    }

    /// Replace every editable field of a contact
    pub async fn update_contact(
        &self,
        auth_user: &AuthenticatedUser,
        id: &str,
        request: ContactRequest,
    ) -> ApiResult<ContactResponse> {
        let request = normalize(request)?;
        let mut contact = self.find_owned(auth_user, id).await?;

        contact.apply(request);
        self.contact_repo.update_contact(&contact).await?;

        Ok(respond(auth_user, contact))
    }

    /// Delete a contact
    pub async fn delete_contact(&self, auth_user: &AuthenticatedUser, id: &str) -> ApiResult<()> {
        if !self
            .contact_repo
            .delete_contact(auth_user.user_id(), id)
            .await?
        {
            return Err(ApiError::NotFound("Contact not found".to_string()));
        }

        tracing::info!("User {} deleted contact {}", auth_user.user_id(), id);
        Ok(())
    }

    /// Partial, case-insensitive search; an empty result is a 404
    pub async fn search_contacts(
        &self,
        auth_user: &AuthenticatedUser,
        params: ContactSearchParams,
    ) -> ApiResult<Vec<ContactResponse>> {
        let params = ContactSearchParams {
            first_name: non_blank(params.first_name),
            last_name: non_blank(params.last_name),
            email: non_blank(params.email),
        };

        let contacts = self
            .contact_repo
            .search_contacts(auth_user.user_id(), &params)
            .await?;

        if contacts.is_empty() {
            return Err(ApiError::NotFound("Contacts not found".to_string()));
        }

        Ok(contacts
            .into_iter()
            .map(|contact| respond(auth_user, contact))
            .collect())
    }

    /// Contacts whose birthday falls within the next `days` days (default 7)
    pub async fn upcoming_birthdays(
        &self,
        auth_user: &AuthenticatedUser,
        days: Option<i64>,
    ) -> ApiResult<Vec<Reminder<String>>> {
        let window = days.unwrap_or(DEFAULT_WINDOW_DAYS);
        let today = self.clock.today();

        let birthdays: Vec<_> = self
            .contact_repo
            .list_all_contacts(auth_user.user_id())
            .await?
            .iter()
            .map(Contact::birthday_record)
            .collect();

        let result = birthday_reminder::upcoming_birthdays(today, &birthdays, window)?;

        for failure in &result.failures {
            metrics::counter!("birthday_reminder_failures_total").increment(1);
            tracing::warn!(
                "Skipping birthday reminder for contact {}: {}",
                failure.contact_id,
                failure.error
            );
        }

        metrics::counter!("birthday_reminders_total").increment(result.reminders.len() as u64);
        tracing::debug!(
            "{} upcoming birthdays within {} days of {} for user {}",
            result.reminders.len(),
            window,
            today,
            auth_user.user_id()
        );

        Ok(result.reminders)
    }

    async fn find_owned(&self, auth_user: &AuthenticatedUser, id: &str) -> ApiResult<Contact> {
        self.contact_repo
            .get_contact(auth_user.user_id(), id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Contact not found".to_string()))
    }
}

fn normalize(mut request: ContactRequest) -> ApiResult<ContactRequest> {
    request.first_name = request.first_name.trim().to_string();
    request.last_name = request.last_name.trim().to_string();
    request.phone = request.phone.trim().to_string();
    request.validate()?;
    request.email = validate_and_normalize_email(&request.email)?;
    Ok(request)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn respond(auth_user: &AuthenticatedUser, contact: Contact) -> ContactResponse {
    ContactResponse::new(contact, Some(UserResponse::from(auth_user.user.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::runtime::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryContacts {
        contacts: Mutex<Vec<Contact>>,
    }

    #[async_trait]
    impl ContactRepository for InMemoryContacts {
        async fn create_contact(&self, contact: &Contact) -> ApiResult<()> {
            self.contacts.lock().unwrap().push(contact.clone());
            Ok(())
        }

        async fn get_contact(&self, user_id: &str, contact_id: &str) -> ApiResult<Option<Contact>> {
            Ok(self
                .contacts
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.user_id == user_id && c.id == contact_id)
                .cloned())
        }

        async fn list_contacts(
            &self,
            user_id: &str,
            limit: i64,
            offset: i64,
        ) -> ApiResult<Vec<Contact>> {
            Ok(self
                .list_all_contacts(user_id)
                .await?
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn list_all_contacts(&self, user_id: &str) -> ApiResult<Vec<Contact>> {
            Ok(self
                .contacts
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn update_contact(&self, contact: &Contact) -> ApiResult<()> {
            let mut contacts = self.contacts.lock().unwrap();
            if let Some(existing) = contacts.iter_mut().find(|c| c.id == contact.id) {
                *existing = contact.clone();
            }
            Ok(())
        }

        async fn delete_contact(&self, user_id: &str, contact_id: &str) -> ApiResult<bool> {
            let mut contacts = self.contacts.lock().unwrap();
            let before = contacts.len();
            contacts.retain(|c| !(c.user_id == user_id && c.id == contact_id));
            Ok(contacts.len() != before)
        }

        async fn search_contacts(
            &self,
            user_id: &str,
            params: &ContactSearchParams,
        ) -> ApiResult<Vec<Contact>> {
            let matches = |value: &str, filter: &Option<String>| {
                filter
                    .as_ref()
                    .map_or(true, |f| value.to_lowercase().contains(&f.to_lowercase()))
            };
            Ok(self
                .list_all_contacts(user_id)
                .await?
                .into_iter()
                .filter(|c| {
                    matches(&c.first_name, &params.first_name)
                        && matches(&c.last_name, &params.last_name)
                        && matches(&c.email, &params.email)
                })
                .collect())
        }
    }

    fn auth_user(id: &str) -> AuthenticatedUser {
        let mut user = User::new(
            format!("user-{}", id),
            format!("{}@example.com", id),
            "hash".to_string(),
            None,
        );
        user.id = id.to_string();
        AuthenticatedUser {
            session: Session::new(user.id.clone(), "token".to_string(), 1),
            user,
            token: "token".to_string(),
        }
    }

    fn request(first_name: &str, birthday: NaiveDate) -> ContactRequest {
        ContactRequest {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@Example.com", first_name.to_lowercase()),
            phone: "+380501234567".to_string(),
            birthday,
            data_add: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(today: NaiveDate) -> ContactService {
        ContactService::new(
            Arc::new(InMemoryContacts::default()),
            Arc::new(FixedClock::new(today)),
        )
    }

    #[test]
    fn test_create_normalizes_email() {
        tokio_test::block_on(async {
            let service = service(date(2024, 1, 1));
            let owner = auth_user("u1");

            let created = service
                .create_contact(&owner, request("Alice", date(1990, 5, 5)))
                .await
                .unwrap();

            assert_eq!(created.email, "alice@example.com");
            assert_eq!(created.user.unwrap().id, "u1");
        });
    }

    #[test]
    fn test_contacts_are_scoped_to_owner() {
        tokio_test::block_on(async {
            let service = service(date(2024, 1, 1));
            let owner = auth_user("u1");
            let stranger = auth_user("u2");

            let created = service
                .create_contact(&owner, request("Alice", date(1990, 5, 5)))
                .await
                .unwrap();

            let result = service.get_contact(&stranger, &created.id).await;
            assert!(matches!(result, Err(ApiError::NotFound(_))));

            let result = service.delete_contact(&stranger, &created.id).await;
            assert!(matches!(result, Err(ApiError::NotFound(_))));

            assert!(service.get_contact(&owner, &created.id).await.is_ok());
        });
    }

    #[test]
    fn test_list_rejects_out_of_range_limit() {
        tokio_test::block_on(async {
            let service = service(date(2024, 1, 1));
            let owner = auth_user("u1");

            assert!(matches!(
                service.list_contacts(&owner, 9, 0).await,
                Err(ApiError::BadRequest(_))
            ));
            assert!(matches!(
                service.list_contacts(&owner, 501, 0).await,
                Err(ApiError::BadRequest(_))
            ));
            assert!(matches!(
                service.list_contacts(&owner, 10, -1).await,
                Err(ApiError::BadRequest(_))
            ));
            assert!(service.list_contacts(&owner, 10, 0).await.is_ok());
        });
    }

    #[test]
    fn test_search_without_match_is_not_found() {
        tokio_test::block_on(async {
            let service = service(date(2024, 1, 1));
            let owner = auth_user("u1");
            service
                .create_contact(&owner, request("Alice", date(1990, 5, 5)))
                .await
                .unwrap();

            let found = service
                .search_contacts(
                    &owner,
                    ContactSearchParams {
                        first_name: Some("LIC".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(found.len(), 1);

            let missing = service
                .search_contacts(
                    &owner,
                    ContactSearchParams {
                        last_name: Some("Smith".to_string()),
                        ..Default::default()
                    },
                )
                .await;
            assert!(matches!(missing, Err(ApiError::NotFound(_))));
        });
    }

    #[test]
    fn test_upcoming_birthdays_skips_invalid_dates() {
        tokio_test::block_on(async {
            let service = service(date(2023, 2, 25));
            let owner = auth_user("u1");
            service
                .create_contact(&owner, request("Leap", date(2000, 2, 29)))
                .await
                .unwrap();
            service
                .create_contact(&owner, request("Bob", date(1980, 2, 27)))
                .await
                .unwrap();

            let reminders = service.upcoming_birthdays(&owner, None).await.unwrap();

            assert_eq!(reminders.len(), 1);
            assert_eq!(reminders[0].first_name, "Bob");
            assert_eq!(reminders[0].formatted_date(), "27.02.2023");
        });
    }

    #[test]
    fn test_upcoming_birthdays_rejects_negative_days() {
        tokio_test::block_on(async {
            let service = service(date(2024, 1, 1));
            let result = service.upcoming_birthdays(&auth_user("u1"), Some(-3)).await;
            assert!(matches!(result, Err(ApiError::BadRequest(_))));
        });
    }
}
