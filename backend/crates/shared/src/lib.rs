//! Shared Kernel - vocabulary shared by every crate in the workspace
//!
//! Holds only what has the same meaning everywhere:
//! - The unified error type and result alias
//! - The error classification that maps onto HTTP statuses
//!
//! Anything that belongs to a single bounded context stays in that crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
