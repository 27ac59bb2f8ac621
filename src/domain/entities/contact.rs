use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::domain::entities::UserResponse;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::birthday_reminder::ContactBirthday;

/// Storage format of `birthday`.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub data_add: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Contact {
    pub fn new(user_id: String, request: ContactRequest) -> Self {
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            birthday: request.birthday,
            data_add: request.data_add,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace every editable field, keeping identity and ownership.
    pub fn apply(&mut self, request: ContactRequest) {
        self.first_name = request.first_name;
        self.last_name = request.last_name;
        self.email = request.email;
        self.phone = request.phone;
        self.birthday = request.birthday;
        self.data_add = request.data_add;
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    pub fn birthday_record(&self) -> ContactBirthday<String> {
        ContactBirthday {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birthday: self.birthday,
        }
    }
}

// DTOs for API requests/responses

/// Body of create and update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub data_add: Option<String>,
}

impl ContactRequest {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name("first_name", &self.first_name)?;
        validate_name("last_name", &self.last_name)?;

        if !phone_regex().is_match(&self.phone) {
            return Err(DomainError::ValidationError(
                "phone must be 9-15 digits, optionally prefixed with '+'".to_string(),
            ));
        }

        if let Some(data_add) = &self.data_add {
            if data_add.chars().count() > 250 {
                return Err(DomainError::ValidationError(
                    "data_add must be at most 250 characters".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn validate_name(field: &str, value: &str) -> DomainResult<()> {
    let len = value.chars().count();
    if len == 0 || len > 50 {
        return Err(DomainError::ValidationError(format!(
            "{} must be 1-50 characters long",
            field
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthday: NaiveDate,
    pub data_add: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub user: Option<UserResponse>,
}

impl ContactResponse {
    pub fn new(contact: Contact, user: Option<UserResponse>) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            birthday: contact.birthday,
            data_add: contact.data_add,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
            user,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

/// Optional filters; each present filter is a case-insensitive substring match.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactSearchParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingBirthdaysParams {
    pub days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            first_name: "Taras".to_string(),
            last_name: "Shevchenko".to_string(),
            email: "taras@example.com".to_string(),
            phone: "+380501234567".to_string(),
            birthday: NaiveDate::from_ymd_opt(1814, 3, 9).unwrap(),
            data_add: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_first_name_rejected() {
        let mut req = request();
        req.first_name = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_long_last_name_rejected() {
        let mut req = request();
        req.last_name = "x".repeat(51);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_phone_pattern() {
        let mut req = request();
        req.phone = "12345678".to_string();
        assert!(req.validate().is_err());

        req.phone = "123456789".to_string();
        assert!(req.validate().is_ok());

        req.phone = "+1-555-0100".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_data_add_limit() {
        let mut req = request();
        req.data_add = Some("n".repeat(251));
        assert!(req.validate().is_err());

        req.data_add = Some("n".repeat(250));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut contact = Contact::new("owner".to_string(), request());
        let id = contact.id.clone();

        let mut update = request();
        update.first_name = "Lesya".to_string();
        contact.apply(update);

        assert_eq!(contact.id, id);
        assert_eq!(contact.user_id, "owner");
        assert_eq!(contact.first_name, "Lesya");
    }

    #[test]
    fn test_birthday_record() {
        let contact = Contact::new("owner".to_string(), request());
        let record = contact.birthday_record();
        assert_eq!(record.id, contact.id);
        assert_eq!(record.birthday, contact.birthday);
    }
}
