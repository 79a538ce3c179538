use crate::cli::globals::GlobalArgs;
use crate::session::SessionSnapshot;
use crate::App;
use anyhow::{Context, Result};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// One line describing the session: login, admin marker and roles.
#[must_use]
pub fn describe(snapshot: &SessionSnapshot) -> String {
    let Some(identity) = snapshot.identity.as_ref().filter(|_| snapshot.authenticated) else {
        return "anonymous".to_string();
    };

    let login = identity.login.as_deref().unwrap_or_default();
    let roles = identity.roles.as_deref().unwrap_or_default().join(", ");
    let admin = if snapshot.is_admin() { " (admin)" } else { "" };

    if roles.is_empty() {
        format!("{login}{admin}")
    } else {
        format!("{login}{admin} [{roles}]")
    }
}

/// Execute the whoami action.
/// # Errors
/// Returns an error if the configuration is invalid.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.globals.app_config().context("invalid configuration")?;
    let app = App::start(config).await?;

    println!("{}", describe(&app.store().snapshot()));

    Ok(())
}
