use crate::cli::globals::GlobalArgs;
use crate::flow::{ForgotPasswordController, ForgotPasswordStatus};
use crate::App;
use anyhow::{bail, Context, Result};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
}

/// Execute the forgot-password action.
/// # Errors
/// Returns an error if the configuration is invalid or the request is rejected.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.globals.app_config().context("invalid configuration")?;
    let app = App::new(config)?;

    let mut controller = ForgotPasswordController::new(&app);
    match controller.submit(&args.username).await {
        ForgotPasswordStatus::Succeeded => {
            println!("{}", ForgotPasswordStatus::Succeeded);
            Ok(())
        }
        ForgotPasswordStatus::Idle => bail!("username is required"),
        status => bail!("{status}"),
    }
}
