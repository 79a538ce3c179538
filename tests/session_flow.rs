use anyhow::{ensure, Result};
use identity_ui::api::AppConfig;
use identity_ui::flow::{
    LoginController, LoginForm, LoginStatus, LogoutController, LogoutOutcome, NavbarController,
    Navigation, RecordingNavigator, Route,
};
use identity_ui::App;
use secrecy::SecretString;
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REFERER: &str = "https://x.example/y";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Backend that only recognizes the caller once the session cookie is set.
async fn identity_backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/account"))
        .and(header("cookie", "SESSION=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "admin",
            "roles": ["ROLE_USER", "ROLE_ims-administrators"],
            "firstName": "Ada"
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/authenticate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "login": "admin",
            "password": "s3cret",
            "rememberMe": true
        })))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "SESSION=abc; Path=/"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/account/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn login_resolve_logout_round_trip() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = identity_backend().await;

    let app = App::start(AppConfig::new(&server.uri())?).await?;
    ensure!(app.store().is_resolved(), "startup must resolve the session");
    ensure!(!app.store().is_authenticated(), "no cookie yet, expected anonymous");

    let navigator = Arc::new(RecordingNavigator::new());
    let navbar = NavbarController::init(&app, navigator.clone());
    ensure!(navbar.view().is_authenticated == Some(false));

    let mut login = LoginController::init(&app, navigator.clone(), Some(REFERER.to_string()));
    let status = login
        .submit(LoginForm {
            username: "admin".to_string(),
            password: SecretString::from("s3cret".to_string()),
            remember_me: true,
        })
        .await;
    ensure!(status == LoginStatus::Succeeded, "unexpected status {status:?}");

    let identity = app.resolver().resolve(true).await;
    ensure!(identity.is_some_and(|identity| identity.login.as_deref() == Some("admin")));
    ensure!(app.store().is_admin());

    let view = navbar.view();
    ensure!(view.is_authenticated == Some(true));
    ensure!(view.is_admin == Some(true));

    ensure!(
        navigator.history()
            == vec![
                Navigation::Redirect(REFERER.to_string()),
                Navigation::Route(Route::Home),
            ],
        "unexpected navigation {:?}",
        navigator.history()
    );
    drop(login);

    let logout = LogoutController::new(&app, navigator.clone(), Some(REFERER.to_string()));
    ensure!(logout.run().await == LogoutOutcome::LoggedOut);
    ensure!(!app.store().is_authenticated());
    ensure!(navbar.view().user.is_none());
    ensure!(
        navigator.last()
            == Some(Navigation::Route(Route::Login {
                service_referer: Some(REFERER.to_string())
            }))
    );

    Ok(())
}

#[tokio::test]
async fn signed_in_user_skips_login_form() -> Result<()> {
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

    let app = App::start(AppConfig::new(&server.uri())?).await?;
    let navigator = Arc::new(RecordingNavigator::new());
    let login = LoginController::init(&app, navigator.clone(), None);

    ensure!(!login.is_watching_session());
    ensure!(navigator.history() == vec![Navigation::Route(Route::Home)]);
    Ok(())
}
