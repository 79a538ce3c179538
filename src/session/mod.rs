//! Session core: who the current user is, how that answer is fetched and cached,
//! and how login and logout change it. This module touches security boundaries
//! and must avoid logging passwords or session material.
//!
//! Flow Overview: startup forces one identity resolution. Login posts the
//! credential and leaves re-resolution to the caller. Logout clears the store
//! only after the backend confirms it.

pub mod authenticator;
pub mod resolver;
pub mod store;
pub mod types;

pub use authenticator::Authenticator;
pub use resolver::IdentityResolver;
pub use store::{SessionSnapshot, SessionStore, Subscription};
pub use types::{Credential, Identity, ResetPasswordRequest, ADMIN_ROLES, SCA_AUTHOR_ROLE};
