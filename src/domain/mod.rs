//! Domain models.

mod user;

pub use user::User;
