//! Logout action: ends the backend session and sends the user back to the login
//! page, carrying the service referer so the next login returns there.

use super::navigation::{Navigator, Route};
use crate::api::ApiError;
use crate::app::App;
use crate::session::Authenticator;
use std::sync::Arc;
use tracing::{error, instrument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Session cleared; the user was sent to the login route.
    LoggedOut,
    /// Backend call failed; the session and the current page are unchanged.
    Failed(ApiError),
}

#[derive(Clone)]
pub struct LogoutController {
    authenticator: Authenticator,
    navigator: Arc<dyn Navigator>,
    service_referer: Option<String>,
}

impl std::fmt::Debug for LogoutController {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LogoutController")
            .field("service_referer", &self.service_referer)
            .finish_non_exhaustive()
    }
}

impl LogoutController {
    #[must_use]
    pub fn new(app: &App, navigator: Arc<dyn Navigator>, service_referer: Option<String>) -> Self {
        Self {
            authenticator: app.authenticator().clone(),
            navigator,
            service_referer,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> LogoutOutcome {
        match self.authenticator.logout().await {
            Ok(()) => {
                self.navigator.navigate(Route::Login {
                    service_referer: self.service_referer.clone(),
                });
                LogoutOutcome::LoggedOut
            }
            Err(err) => {
                error!(error = %err, "logout failed, staying on the current page");
                LogoutOutcome::Failed(err)
            }
        }
    }
}
