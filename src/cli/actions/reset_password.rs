use crate::cli::globals::GlobalArgs;
use crate::flow::{ResetPasswordController, ResetPasswordStatus};
use crate::App;
use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub key: String,
    pub password: SecretString,
}

/// Execute the reset-password action.
/// # Errors
/// Returns an error if the configuration is invalid or the key is rejected.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.globals.app_config().context("invalid configuration")?;
    let app = App::new(config)?;

    let mut controller = ResetPasswordController::new(&app, Some(args.key));
    let confirm = SecretString::from(args.password.expose_secret().to_string());

    match controller.submit(args.password, confirm).await {
        ResetPasswordStatus::Succeeded => {
            println!("password changed");
            Ok(())
        }
        ResetPasswordStatus::InvalidKey => bail!("the reset key is missing, expired or invalid"),
        ResetPasswordStatus::DoNotMatch | ResetPasswordStatus::Idle => {
            bail!("the password and its confirmation do not match")
        }
    }
}
