use chrono::NaiveDate;
use contactbook::application::services::auth::generate_session_token;
use contactbook::domain::entities::{ContactRequest, Session, User};
use contactbook::domain::ports::user_repository::UserRepository;
use contactbook::infrastructure::http::middleware::AuthenticatedUser;
use contactbook::infrastructure::persistence::Database;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Store a user directly, bypassing signup and password hashing.
pub async fn create_test_user(db: &Database, username: &str) -> User {
    let user = User::new(
        username.to_string(),
        format!("{}@example.com", username),
        "not-a-real-hash".to_string(),
        None,
    );
    db.create_user(&user).await.expect("Failed to create user");
    user
}

pub fn authenticated(user: &User) -> AuthenticatedUser {
    let token = generate_session_token();
    AuthenticatedUser {
        user: user.clone(),
        session: Session::new(user.id.clone(), token.clone(), 9),
        token,
    }
}

pub fn contact_request(first_name: &str, last_name: &str, birthday: NaiveDate) -> ContactRequest {
    ContactRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        phone: "+380501234567".to_string(),
        birthday,
        data_add: None,
    }
}
