//! # Identity UI (session and authorization core)
//!
//! `identity-ui` is the client side of the identity management front-end. It
//! answers "who is the current user", keeps that answer in a shared session
//! store, broadcasts changes to interested views, and drives login, logout and
//! password reset against the identity backend.
//!
//! ## Components
//!
//! - **Session store** (`session::store`): resolved identity, authentication flag
//!   and resolution status, plus a synchronous change-notification channel.
//! - **Identity resolver** (`session::resolver`): fetches `api/account` and turns
//!   every failure into an anonymous session instead of an error.
//! - **Authenticator** (`session::authenticator`): login, logout and password
//!   reset exchanges. Logout clears the store only after the backend confirms.
//! - **Request augmenter** (`api::headers`): JSON content negotiation headers on
//!   every outgoing request, never overwriting caller headers.
//! - **Flow controllers** (`flow`): login, logout, reset password and navbar view
//!   models. Navigation is delegated to a `Navigator` implementation.
//!
//! ## Startup
//!
//! `App::start` resolves the identity once with `force = true` before any
//! controller reads the store. Passwords travel as `SecretString` and must never
//! be logged.

pub mod api;
pub mod app;
pub mod cli;
pub mod flow;
pub mod session;

pub use app::App;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
