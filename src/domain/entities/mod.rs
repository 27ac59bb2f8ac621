pub mod contact;
pub mod session;
pub mod user;

pub use contact::*;
pub use session::*;
pub use user::*;
