use sha2::{Digest, Sha256};
use thiserror::Error;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GravatarError {
    #[error("cannot derive an avatar from an empty email")]
    EmptyEmail,
}

/// Gravatar image URL for an email address.
///
/// The hash is SHA-256 over the trimmed, lowercased address; unknown
/// addresses fall back to a generated identicon.
pub fn gravatar_url(email: &str) -> Result<String, GravatarError> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(GravatarError::EmptyEmail);
    }

    let digest = Sha256::digest(normalized.as_bytes());
    Ok(format!("{}/{}?d=identicon", GRAVATAR_BASE, hex::encode(digest)))
}
