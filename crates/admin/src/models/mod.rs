//! Domain models for admin.

pub mod credential;
pub mod session;

pub use credential::AdminCredential;
pub use session::{CurrentAdmin, SessionClaims};
