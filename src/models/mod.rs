pub mod dto;
pub mod error;
pub mod user;
pub use error::Error;
pub use user::User;
