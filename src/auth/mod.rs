//! Authentication module
//!
//! Supports: username/password login and static API tokens.
//!
//! The `Authenticator` attaches `Authorization: Bearer <token>` to every
//! request and caches the token obtained from `auth/login`, logging in
//! again when the API rejects it.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{CachedToken, Credentials};
