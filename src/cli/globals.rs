use crate::api::{ApiError, AppConfig};

/// Options shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub api_base_url: String,
    pub default_destination: Option<String>,
    pub timeout_seconds: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            default_destination: None,
            timeout_seconds: crate::api::config::DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// # Errors
    /// Returns `ApiError::Config` when the base URL is blank or invalid.
    pub fn app_config(&self) -> Result<AppConfig, ApiError> {
        Ok(AppConfig::new(&self.api_base_url)?
            .with_default_destination(self.default_destination.as_deref())
            .with_timeout_seconds(self.timeout_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new("https://ims.example/".to_string());
        assert_eq!(args.api_base_url, "https://ims.example/");
        assert_eq!(args.default_destination, None);
        assert_eq!(args.timeout_seconds, 10);
    }

    #[test]
    fn app_config_applies_overrides() -> Result<(), ApiError> {
        let args = GlobalArgs {
            api_base_url: "https://ims.example/".to_string(),
            default_destination: Some("https://portal.example/".to_string()),
            timeout_seconds: 3,
        };
        let config = args.app_config()?;
        assert_eq!(config.default_destination, "https://portal.example/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        Ok(())
    }

    #[test]
    fn app_config_rejects_blank_url() {
        let args = GlobalArgs::new("  ".to_string());
        assert!(matches!(args.app_config(), Err(ApiError::Config(_))));
    }
}
