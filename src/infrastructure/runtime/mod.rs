pub mod clock;
pub mod session_cleanup;
