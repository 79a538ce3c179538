use crate::cli::globals::GlobalArgs;
use crate::flow::{LogoutController, LogoutOutcome, Navigation, RecordingNavigator};
use crate::App;
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub service_referer: Option<String>,
}

/// Execute the logout action and print the login route.
/// # Errors
/// Returns an error if the configuration is invalid or the backend refuses the logout.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.globals.app_config().context("invalid configuration")?;
    let app = App::start(config).await?;
    let navigator = Arc::new(RecordingNavigator::new());

    let controller = LogoutController::new(&app, navigator.clone(), args.service_referer);
    match controller.run().await {
        LogoutOutcome::LoggedOut => {
            if let Some(Navigation::Route(route)) = navigator.last() {
                println!("{}", route.path());
            }
            Ok(())
        }
        LogoutOutcome::Failed(err) => Err(err).context("logout failed"),
    }
}
