//! Login page controller.
//!
//! States: `Idle -> Submitting -> Succeeded | AuthenticationError |
//! ForbiddenError`. A user who is already signed in never reaches
//! `Submitting`: the controller sends them home at init, or as soon as the store
//! reports an authenticated session. Failed attempts set exactly one of the two
//! error flags, and both are cleared when a new submission starts.

use super::navigation::{Navigator, Route};
use crate::api::ApiError;
use crate::app::App;
use crate::session::{Authenticator, Credential, SessionStore, Subscription};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginStatus {
    Idle,
    Submitting,
    Succeeded,
    AuthenticationError,
    ForbiddenError,
}

/// User-facing classification of a failed login.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginFailure {
    /// Bad credentials (400/404); retrying with other credentials may work.
    Correctable,
    /// Access denied or backend unavailable; retrying credentials will not help.
    Forbidden,
}

impl LoginFailure {
    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        match err.status() {
            Some(400 | 404) => LoginFailure::Correctable,
            _ => LoginFailure::Forbidden,
        }
    }
}

impl fmt::Display for LoginFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginFailure::Correctable => write!(
                formatter,
                "Failed to sign in! Please check your credentials and try again."
            ),
            LoginFailure::Forbidden => write!(
                formatter,
                "Access denied. Your account is not allowed to sign in here."
            ),
        }
    }
}

/// Values typed into the login form.
#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl LoginForm {
    /// Username and password are both required.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }

    fn into_credential(self) -> Credential {
        Credential {
            username: self.username,
            password: self.password,
            remember_me: self.remember_me,
        }
    }
}

pub struct LoginController {
    authenticator: Authenticator,
    navigator: Arc<dyn Navigator>,
    default_destination: String,
    service_referer: Option<String>,
    status: LoginStatus,
    authentication_error: bool,
    forbidden_error: bool,
    submitted: bool,
    subscription: Option<Subscription>,
}

impl fmt::Debug for LoginController {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginController")
            .field("status", &self.status)
            .field("service_referer", &self.service_referer)
            .field("authentication_error", &self.authentication_error)
            .field("forbidden_error", &self.forbidden_error)
            .finish_non_exhaustive()
    }
}

impl LoginController {
    /// Opens the login page. `service_referer` is the value captured from the
    /// page URL at load time.
    #[must_use]
    pub fn init(app: &App, navigator: Arc<dyn Navigator>, service_referer: Option<String>) -> Self {
        let subscription = guard_signed_in(app.store(), &navigator);

        Self {
            authenticator: app.authenticator().clone(),
            navigator,
            default_destination: app.config().default_destination.clone(),
            service_referer,
            status: LoginStatus::Idle,
            authentication_error: false,
            forbidden_error: false,
            submitted: false,
            subscription,
        }
    }

    #[must_use]
    pub fn status(&self) -> LoginStatus {
        self.status
    }

    /// Bad credentials on the last attempt.
    #[must_use]
    pub fn authentication_error(&self) -> bool {
        self.authentication_error
    }

    /// Access denied on the last attempt.
    #[must_use]
    pub fn forbidden_error(&self) -> bool {
        self.forbidden_error
    }

    /// Whether the user tried to submit at least once (drives form hints).
    #[must_use]
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Whether the controller is still waiting for a signed-in notification.
    #[must_use]
    pub fn is_watching_session(&self) -> bool {
        self.subscription.is_some()
    }

    /// Where a successful login sends the user.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.service_referer
            .as_deref()
            .unwrap_or(&self.default_destination)
    }

    /// Validates the form and, when complete, attempts the login.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn submit(&mut self, form: LoginForm) -> LoginStatus {
        self.authentication_error = false;
        self.forbidden_error = false;
        self.submitted = true;

        if !form.is_valid() {
            debug!("login form incomplete");
            self.status = LoginStatus::Idle;
            return self.status;
        }

        self.status = LoginStatus::Submitting;

        match self.authenticator.login(form.into_credential()).await {
            Ok(()) => {
                let destination = self.destination().to_string();
                self.navigator.redirect(&destination);
                self.status = LoginStatus::Succeeded;
            }
            Err(err) => match LoginFailure::from_error(&err) {
                LoginFailure::Correctable => {
                    warn!(status = ?err.status(), "login rejected");
                    self.authentication_error = true;
                    self.status = LoginStatus::AuthenticationError;
                }
                LoginFailure::Forbidden => {
                    warn!(status = ?err.status(), "login forbidden");
                    self.forbidden_error = true;
                    self.status = LoginStatus::ForbiddenError;
                }
            },
        }

        self.status
    }
}

/// Sends a signed-in user home now, or on the first authenticated notification.
fn guard_signed_in(store: &SessionStore, navigator: &Arc<dyn Navigator>) -> Option<Subscription> {
    if store.is_resolved() && store.is_authenticated() {
        debug!("already signed in");
        navigator.navigate(Route::Home);
        return None;
    }

    let navigator = Arc::clone(navigator);
    let navigated = AtomicBool::new(false);
    Some(store.subscribe(move |snapshot| {
        if snapshot.authenticated && !navigated.swap(true, Ordering::SeqCst) {
            debug!("session became authenticated");
            navigator.navigate(Route::Home);
        }
    }))
}
