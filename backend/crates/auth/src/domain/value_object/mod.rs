//! Value Object Module

pub mod credentials;
pub mod email;
pub mod password;

pub use credentials::Credentials;
pub use email::Email;
pub use password::Password;
