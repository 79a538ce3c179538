use crate::cli::actions::{forgot_password, login, logout, reset_password, whoami, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Whoami(args) => whoami::execute(args).await,
        Action::Login(args) => login::execute(args).await,
        Action::Logout(args) => logout::execute(args).await,
        Action::ResetPassword(args) => reset_password::execute(args).await,
        Action::ForgotPassword(args) => forgot_password::execute(args).await,
    }
}
