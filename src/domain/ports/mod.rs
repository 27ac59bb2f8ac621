pub mod clock;
pub mod contact_repository;
pub mod session_repository;
pub mod user_repository;
