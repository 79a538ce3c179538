//! Application context: one session store shared by the resolver, the
//! authenticator and every controller. `start` hydrates the session once with a
//! forced resolution before anything reads it.

use crate::api::{ApiClient, ApiError, AppConfig};
use crate::session::{Authenticator, IdentityResolver, SessionStore};
use tracing::info;

#[derive(Clone, Debug)]
pub struct App {
    config: AppConfig,
    store: SessionStore,
    resolver: IdentityResolver,
    authenticator: Authenticator,
}

impl App {
    /// Wires the components around a fresh, unresolved store.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let client = ApiClient::new(config.clone())?;
        let store = SessionStore::new();
        let resolver = IdentityResolver::new(client.clone(), store.clone());
        let authenticator = Authenticator::new(client, store.clone());

        Ok(Self {
            config,
            store,
            resolver,
            authenticator,
        })
    }

    /// Builds the context and resolves the current identity.
    /// Resolution failures leave the session anonymous; they are not errors.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub async fn start(config: AppConfig) -> Result<Self, ApiError> {
        let app = Self::new(config)?;
        app.resolver.resolve(true).await;
        info!(
            authenticated = app.store.is_authenticated(),
            "session hydrated"
        );
        Ok(app)
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[test]
    fn new_starts_unresolved() -> Result<()> {
        let app = App::new(AppConfig::new("http://127.0.0.1:9")?)?;
        assert!(!app.store().is_resolved());
        assert!(!app.store().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn start_resolves_once() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/account"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "login": "jdoe", "roles": ["ROLE_USER"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let app = App::start(AppConfig::new(&server.uri())?).await?;
        assert!(app.store().is_resolved());
        assert!(app.store().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn start_with_backend_down_is_anonymous() -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let address = listener.local_addr()?;
        drop(listener);

        let app = App::start(AppConfig::new(&format!("http://{address}"))?).await?;
        assert!(app.store().is_resolved());
        assert!(!app.store().is_authenticated());
        Ok(())
    }
}
