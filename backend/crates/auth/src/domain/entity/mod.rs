//! Entity Module

pub mod auth_user;
pub mod cookie_pair;
pub mod session_record;
pub mod signed_token;

pub use auth_user::AuthUser;
pub use cookie_pair::{CookieKind, CookiePair, CookiePairState, CookieWrite, CookieWrites};
pub use session_record::{SessionGrant, SessionRecord, SessionView};
pub use signed_token::SignedToken;
