use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};

/// Longest address the `users` and `contacts` tables accept.
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Trim, validate and lowercase an email address.
pub fn validate_and_normalize_email(email: &str) -> ApiResult<String> {
    let trimmed = email.trim();

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Email must be at most {} characters",
            MAX_EMAIL_LENGTH
        )));
    }

    if !email_address::EmailAddress::is_valid(trimmed) {
        return Err(ApiError::BadRequest(
            "Invalid email format. Must be in format user@domain.tld".to_string(),
        ));
    }

    // email_address accepts dotless domains such as user@localhost
    let has_tld = trimmed
        .rsplit_once('@')
        .map_or(false, |(_, domain)| domain.contains('.'));
    if !has_tld {
        return Err(ApiError::BadRequest(
            "Invalid email format. Domain must include a TLD (e.g., .com, .org)".to_string(),
        ));
    }

    Ok(trimmed.to_lowercase())
}
