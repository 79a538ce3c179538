//! Finishes a password reset started from an emailed link. The reset key comes
//! from the link's `key` query parameter.

use super::navigation::query_param;
use crate::app::App;
use crate::session::{Authenticator, ResetPasswordRequest};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

/// Query parameter holding the reset key.
pub const RESET_KEY: &str = "key";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetPasswordStatus {
    Idle,
    Succeeded,
    DoNotMatch,
    InvalidKey,
}

#[derive(Debug)]
pub struct ResetPasswordController {
    authenticator: Authenticator,
    key: Option<String>,
    status: ResetPasswordStatus,
}

impl ResetPasswordController {
    #[must_use]
    pub fn new(app: &App, key: Option<String>) -> Self {
        Self {
            authenticator: app.authenticator().clone(),
            key: key.filter(|key| !key.trim().is_empty()),
            status: ResetPasswordStatus::Idle,
        }
    }

    /// Builds the controller from the reset page URL.
    #[must_use]
    pub fn from_page_url(app: &App, page_url: &str) -> Self {
        Self::new(app, query_param(page_url, RESET_KEY))
    }

    #[must_use]
    pub fn status(&self) -> ResetPasswordStatus {
        self.status
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    #[instrument(skip_all)]
    pub async fn submit(
        &mut self,
        password: SecretString,
        confirm_password: SecretString,
    ) -> ResetPasswordStatus {
        self.status = ResetPasswordStatus::Idle;

        if password.expose_secret() != confirm_password.expose_secret() {
            debug!("passwords do not match");
            self.status = ResetPasswordStatus::DoNotMatch;
            return self.status;
        }

        let Some(key) = self.key.clone() else {
            warn!("reset key missing from the link");
            self.status = ResetPasswordStatus::InvalidKey;
            return self.status;
        };

        let request = ResetPasswordRequest { key, password };
        self.status = match self.authenticator.reset_password(request).await {
            Ok(()) => ResetPasswordStatus::Succeeded,
            Err(_) => ResetPasswordStatus::InvalidKey,
        };
        self.status
    }
}
