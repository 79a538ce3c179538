//! Login, logout, password recovery and password reset exchanges with the
//! identity backend.
//!
//! The authenticator reports backend errors as-is, status included; deciding
//! what a status means for the user is the controllers' job. It never reads the
//! session store and only writes to it to clear the session after the backend
//! confirms a logout. Credentials must never be logged.

use super::{
    store::SessionStore,
    types::{Credential, LoginRequest, ResetPasswordRequest},
};
use crate::api::{paths, ApiClient, ApiError};
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{error, info, instrument};

#[derive(Clone, Debug)]
pub struct Authenticator {
    client: ApiClient,
    store: SessionStore,
}

impl Authenticator {
    #[must_use]
    pub fn new(client: ApiClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// Posts the credential to `api/authenticate`. The credential is consumed.
    /// On success the caller re-resolves the identity or navigates away.
    ///
    /// # Errors
    /// Returns the backend error unchanged, HTTP status included.
    #[instrument(skip(self, credential), fields(username = %credential.username))]
    pub async fn login(&self, credential: Credential) -> Result<(), ApiError> {
        let request = LoginRequest::from(&credential);
        match self.client.post_json(paths::AUTHENTICATE, &request).await {
            Ok(()) => {
                info!("login accepted");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "error while trying to log in");
                Err(err)
            }
        }
    }

    /// Ends the server-side session, then clears the local one.
    ///
    /// # Errors
    /// Returns the backend error; the local session is left untouched in that case.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        match self.client.post_json(paths::LOGOUT, &json!({})).await {
            Ok(()) => {
                self.store.authenticate(None);
                info!("logout confirmed");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "error while trying to log out");
                Err(err)
            }
        }
    }

    /// Asks the backend to email a reset key for `username`. The body is the bare
    /// username.
    ///
    /// # Errors
    /// Returns the backend error unchanged, body text included.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, username: &str) -> Result<(), ApiError> {
        match self.client.post_text(paths::FORGOT_PASSWORD, username).await {
            Ok(()) => {
                info!("password reset requested");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "error while requesting a password reset");
                Err(err)
            }
        }
    }

    /// Sets a new password with the key from the reset email.
    ///
    /// # Errors
    /// Returns the backend error when the key is rejected or the call fails.
    #[instrument(skip(self, request))]
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> Result<(), ApiError> {
        let fields = [
            ("key", request.key.as_str()),
            ("password", request.password.expose_secret()),
        ];
        self.client
            .post_form(paths::RESET_PASSWORD, &fields)
            .await
            .inspect_err(|err| error!(error = %err, "error while trying to reset password"))
    }
}
