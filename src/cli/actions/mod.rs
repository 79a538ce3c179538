pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod reset_password;
pub mod whoami;

// Single dispatch point for `Action`; extend `run::execute` with new variants.
mod run;

#[derive(Debug)]
pub enum Action {
    Whoami(whoami::Args),
    Login(login::Args),
    Logout(logout::Args),
    ResetPassword(reset_password::Args),
    ForgotPassword(forgot_password::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
