//! Session payloads exchanged with the identity backend. Credentials carry
//! passwords as `SecretString`, so `Debug` output and logs never contain them.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Roles that unlock the administration menu.
pub const ADMIN_ROLES: [&str; 2] = ["ROLE_ihtsdo-ops-admin", "ROLE_ims-administrators"];

/// Role that unlocks the authoring service link on the home page.
pub const SCA_AUTHOR_ROLE: &str = "ROLE_ihtsdo-sca-author";

/// The principal returned by `api/account`.
/// A missing or null `login` means the backend answered for an anonymous user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    /// Profile attributes (`firstName`, `email`, ...) passed through untouched.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Identity {
    #[must_use]
    pub fn new(login: &str, roles: &[&str]) -> Self {
        Self {
            login: Some(login.to_string()),
            roles: Some(roles.iter().map(ToString::to_string).collect()),
            attributes: Map::new(),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_login(&self) -> bool {
        self.login.is_some()
    }

    /// Role membership; duplicates and ordering are irrelevant.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles
            .as_deref()
            .is_some_and(|roles| roles.iter().any(|candidate| candidate == role))
    }
}

/// Username and password typed into the login form.
#[derive(Debug)]
pub struct Credential {
    pub username: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl Credential {
    #[must_use]
    pub fn new(username: &str, password: SecretString, remember_me: bool) -> Self {
        Self {
            username: username.to_string(),
            password,
            remember_me,
        }
    }
}

/// Wire shape of `POST api/authenticate`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
    pub remember_me: bool,
}

impl<'a> From<&'a Credential> for LoginRequest<'a> {
    fn from(credential: &'a Credential) -> Self {
        Self {
            login: &credential.username,
            password: credential.password.expose_secret(),
            remember_me: credential.remember_me,
        }
    }
}

/// Reset key from the emailed link plus the new password.
#[derive(Debug)]
pub struct ResetPasswordRequest {
    pub key: String,
    pub password: SecretString,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_keeps_profile_attributes() -> Result<(), serde_json::Error> {
        let identity: Identity = serde_json::from_value(json!({
            "login": "jdoe",
            "roles": ["ROLE_USER"],
            "firstName": "Jane",
            "email": "jane@example.org"
        }))?;

        assert_eq!(identity.login.as_deref(), Some("jdoe"));
        assert!(identity.has_role("ROLE_USER"));
        assert_eq!(identity.attributes.get("firstName"), Some(&json!("Jane")));
        assert_eq!(identity.attributes.len(), 2);
        Ok(())
    }

    #[test]
    fn identity_accepts_null_login_and_roles() -> Result<(), serde_json::Error> {
        let identity: Identity = serde_json::from_value(json!({ "login": null, "roles": null }))?;
        assert!(!identity.has_login());
        assert!(!identity.has_role("ROLE_USER"));

        let identity: Identity = serde_json::from_value(json!({}))?;
        assert_eq!(identity, Identity::anonymous());
        Ok(())
    }

    #[test]
    fn has_role_tolerates_duplicates() {
        let identity = Identity::new("jdoe", &["ROLE_USER", "ROLE_USER"]);
        assert!(identity.has_role("ROLE_USER"));
        assert!(!identity.has_role("ROLE_ADMIN"));
    }

    #[test]
    fn login_request_uses_backend_field_names() -> Result<(), serde_json::Error> {
        let credential = Credential::new("jdoe", SecretString::from("s3cret".to_string()), true);
        let value = serde_json::to_value(LoginRequest::from(&credential))?;
        assert_eq!(
            value,
            json!({ "login": "jdoe", "password": "s3cret", "rememberMe": true })
        );
        Ok(())
    }

    #[test]
    fn credential_debug_hides_password() {
        let credential = Credential::new("jdoe", SecretString::from("s3cret".to_string()), false);
        let debug = format!("{credential:?}");
        assert!(debug.contains("jdoe"));
        assert!(!debug.contains("s3cret"));
    }
}
