pub mod birthday_reminder;

pub use birthday_reminder::*;
