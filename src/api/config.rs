//! Client configuration for the identity backend. Values come from CLI flags or
//! their environment fallbacks and are normalized here so the rest of the crate
//! never sees blank strings. Configuration values are public; do not store
//! secrets here.

use super::errors::ApiError;
use std::time::Duration;

/// Post-login destination used when no `serviceReferer` is supplied.
pub const DEFAULT_DESTINATION: &str = "https://confluence.ihtsdotools.org/dashboard";

/// Default transport timeout (seconds) applied by the HTTP client.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub default_destination: String,
    pub timeout: Duration,
}

impl AppConfig {
    /// Builds a config around the API base URL with default destination and timeout.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when the base URL is blank or not an absolute URL.
    pub fn new(api_base_url: &str) -> Result<Self, ApiError> {
        let Some(base) = normalize_value(api_base_url) else {
            return Err(ApiError::Config("API base URL is not configured.".to_string()));
        };

        url::Url::parse(&base)
            .map_err(|err| ApiError::Config(format!("Invalid API base URL {base}: {err}")))?;

        Ok(Self {
            api_base_url: base,
            default_destination: DEFAULT_DESTINATION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        })
    }

    /// Overrides the post-login destination; blank values keep the default.
    #[must_use]
    pub fn with_default_destination(mut self, destination: Option<&str>) -> Self {
        if let Some(value) = destination.and_then(normalize_value) {
            self.default_destination = value;
        }
        self
    }

    /// Overrides the transport timeout; zero keeps the default.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        if seconds > 0 {
            self.timeout = Duration::from_secs(seconds);
        }
        self
    }

    /// Joins a backend path (`api/account`) onto the configured base URL.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        build_url_with_base(&self.api_base_url, path)
    }
}

fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_base_url() {
        assert!(matches!(AppConfig::new("   "), Err(ApiError::Config(_))));
    }

    #[test]
    fn new_rejects_relative_base_url() {
        assert!(matches!(AppConfig::new("ims/api"), Err(ApiError::Config(_))));
    }

    #[test]
    fn new_applies_defaults() -> Result<(), ApiError> {
        let config = AppConfig::new(" https://ims.example ")?;
        assert_eq!(config.api_base_url, "https://ims.example");
        assert_eq!(config.default_destination, DEFAULT_DESTINATION);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        Ok(())
    }

    #[test]
    fn overrides_ignore_empty_values() -> Result<(), ApiError> {
        let config = AppConfig::new("https://ims.example")?
            .with_default_destination(Some("  "))
            .with_timeout_seconds(0);
        assert_eq!(config.default_destination, DEFAULT_DESTINATION);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));

        let config = config
            .with_default_destination(Some("https://portal.example/home"))
            .with_timeout_seconds(3);
        assert_eq!(config.default_destination, "https://portal.example/home");
        assert_eq!(config.timeout, Duration::from_secs(3));
        Ok(())
    }

    #[test]
    fn build_url_joins_slashes() {
        assert_eq!(
            build_url_with_base("https://ims.example/", "/api/account"),
            "https://ims.example/api/account"
        );
        assert_eq!(
            build_url_with_base("https://ims.example/ims", "api/authenticate"),
            "https://ims.example/ims/api/authenticate"
        );
        assert_eq!(build_url_with_base("", "api/account"), "api/account");
    }
}
