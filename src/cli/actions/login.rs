use crate::cli::globals::GlobalArgs;
use crate::flow::{
    LoginController, LoginFailure, LoginForm, LoginStatus, Navigation, RecordingNavigator,
};
use crate::App;
use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: SecretString,
    pub remember_me: bool,
    pub service_referer: Option<String>,
}

/// Execute the login action and print where the user would be sent.
/// # Errors
/// Returns an error if the configuration is invalid or the login fails.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.globals.app_config().context("invalid configuration")?;
    let app = App::start(config).await?;
    let navigator = Arc::new(RecordingNavigator::new());

    let mut controller = LoginController::init(&app, navigator.clone(), args.service_referer);
    if let Some(Navigation::Route(route)) = navigator.last() {
        println!("already signed in, redirecting to {}", route.path());
        return Ok(());
    }

    let status = controller
        .submit(LoginForm {
            username: args.username,
            password: args.password,
            remember_me: args.remember_me,
        })
        .await;
    drop(controller);

    match status {
        LoginStatus::Succeeded => {
            app.resolver().resolve(true).await;
            info!(
                authenticated = app.store().is_authenticated(),
                "identity refreshed after login"
            );
            if let Some(Navigation::Redirect(url)) = navigator.last() {
                println!("{url}");
            }
            Ok(())
        }
        LoginStatus::AuthenticationError => bail!("{}", LoginFailure::Correctable),
        LoginStatus::ForbiddenError => bail!("{}", LoginFailure::Forbidden),
        LoginStatus::Idle | LoginStatus::Submitting => {
            debug!(?status, "login not submitted");
            bail!("username and password are required")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn args(server: &MockServer, username: &str) -> Args {
        Args {
            globals: GlobalArgs::new(server.uri()),
            username: username.to_string(),
            password: SecretString::from("s3cret".to_string()),
            remember_me: true,
            service_referer: Some("https://x.example/y".to_string()),
        }
    }

    async fn authenticate_responds(server: &MockServer, template: ResponseTemplate, hits: u64) {
        Mock::given(method("POST"))
            .and(path("/api/authenticate"))
            .respond_with(template)
            .expect(hits)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn signed_in_user_is_not_submitted() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/account"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "login": "jdoe", "roles": [] })),
            )
            .mount(&server)
            .await;
        authenticate_responds(&server, ResponseTemplate::new(200), 0).await;

        execute(args(&server, "jdoe")).await
    }

    #[tokio::test]
    async fn accepted_credentials_succeed() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        authenticate_responds(&server, ResponseTemplate::new(200), 1).await;

        execute(args(&server, "jdoe")).await
    }

    #[tokio::test]
    async fn rejected_credentials_report_correctable_failure() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        authenticate_responds(&server, ResponseTemplate::new(400), 1).await;

        let result = execute(args(&server, "jdoe")).await;

        assert!(result.is_err_and(|err| err.to_string() == LoginFailure::Correctable.to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn forbidden_account_reports_access_denied() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        authenticate_responds(&server, ResponseTemplate::new(403), 1).await;

        let result = execute(args(&server, "jdoe")).await;

        assert!(result.is_err_and(|err| err.to_string() == LoginFailure::Forbidden.to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn empty_username_is_not_submitted() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        authenticate_responds(&server, ResponseTemplate::new(200), 0).await;

        let result = execute(args(&server, "")).await;

        assert!(result.is_err_and(|err| err.to_string() == "username and password are required"));
        Ok(())
    }

    #[tokio::test]
    async fn blank_base_url_is_a_configuration_error() {
        let args = Args {
            globals: GlobalArgs::new(" ".to_string()),
            username: "jdoe".to_string(),
            password: SecretString::from("s3cret".to_string()),
            remember_me: true,
            service_referer: None,
        };

        let result = execute(args).await;

        assert!(result.is_err_and(|err| err.to_string() == "invalid configuration"));
    }
}
