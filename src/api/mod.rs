//! Backend access shared by the session core: configuration, the cookie-aware
//! HTTP client, request header defaults and the error type every exchange
//! reports. Centralizing these keeps network behavior consistent across the
//! resolver, the authenticator and the controllers.

pub mod client;
pub mod config;
pub mod errors;
pub mod headers;

pub use client::{ApiClient, ApiRequest, RequestBody};
pub use config::AppConfig;
pub use errors::ApiError;

/// Backend paths, relative to the configured API base URL.
pub mod paths {
    pub const ACCOUNT: &str = "api/account";
    pub const AUTHENTICATE: &str = "api/authenticate";
    pub const FORGOT_PASSWORD: &str = "api/forgot_password";
    pub const LOGOUT: &str = "api/account/logout";
    pub const RESET_PASSWORD: &str = "api/reset_password";
}
