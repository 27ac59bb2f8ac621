pub mod auth;
pub mod contact_service;
pub mod session_service;
pub mod user_service;

pub use auth::AuthService;
pub use contact_service::ContactService;
pub use session_service::SessionService;
pub use user_service::UserService;
