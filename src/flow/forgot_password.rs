//! Password recovery: asks the backend to email a reset key, which the reset
//! password page later consumes.
//!
//! Failures are told apart by the backend's plain-text body. A 400 naming an
//! existing login or e-mail address gets its own message; everything else is a
//! generic error.

use crate::api::ApiError;
use crate::app::App;
use crate::session::Authenticator;
use std::fmt;
use tracing::{debug, instrument, warn};

const LOGIN_IN_USE: &str = "login already in use";
const EMAIL_IN_USE: &str = "e-mail address already in use";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForgotPasswordStatus {
    Idle,
    Succeeded,
    UserExists,
    EmailExists,
    Error,
}

impl ForgotPasswordStatus {
    /// Maps a failed request onto the page's error variants.
    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        match err {
            ApiError::Http { status: 400, message } if message == LOGIN_IN_USE => {
                ForgotPasswordStatus::UserExists
            }
            ApiError::Http { status: 400, message } if message == EMAIL_IN_USE => {
                ForgotPasswordStatus::EmailExists
            }
            _ => ForgotPasswordStatus::Error,
        }
    }
}

impl fmt::Display for ForgotPasswordStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ForgotPasswordStatus::Idle => "Enter your username.",
            ForgotPasswordStatus::Succeeded => "Check your e-mail for a password reset link.",
            ForgotPasswordStatus::UserExists => "Login name already registered!",
            ForgotPasswordStatus::EmailExists => "E-mail is already in use!",
            ForgotPasswordStatus::Error => "Password reset request failed! Please try again later.",
        };
        formatter.write_str(message)
    }
}

#[derive(Debug)]
pub struct ForgotPasswordController {
    authenticator: Authenticator,
    status: ForgotPasswordStatus,
}

impl ForgotPasswordController {
    #[must_use]
    pub fn new(app: &App) -> Self {
        Self {
            authenticator: app.authenticator().clone(),
            status: ForgotPasswordStatus::Idle,
        }
    }

    #[must_use]
    pub fn status(&self) -> ForgotPasswordStatus {
        self.status
    }

    /// Requests a reset email. An empty username stays `Idle` without a request.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, username: &str) -> ForgotPasswordStatus {
        self.status = ForgotPasswordStatus::Idle;

        if username.is_empty() {
            debug!("username missing");
            return self.status;
        }

        self.status = match self.authenticator.forgot_password(username).await {
            Ok(()) => ForgotPasswordStatus::Succeeded,
            Err(err) => {
                let status = ForgotPasswordStatus::from_error(&err);
                warn!(?status, "password reset request rejected");
                status
            }
        };
        self.status
    }
}
