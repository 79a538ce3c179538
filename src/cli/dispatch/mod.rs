//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to an `Action` carrying its own arguments plus
//! the shared `GlobalArgs`.

use crate::cli::actions::{forgot_password, login, logout, reset_password, whoami, Action};
use crate::cli::commands::{
    account, ARG_API_BASE_URL, ARG_DEFAULT_DESTINATION, ARG_TIMEOUT_SECONDS,
};
use crate::cli::globals::GlobalArgs;
use anyhow::{bail, Context, Result};
use secrecy::SecretString;

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_base_url = matches
        .get_one::<String>(ARG_API_BASE_URL)
        .cloned()
        .context("missing required argument: --api-base-url")?;

    let mut globals = GlobalArgs::new(api_base_url);
    globals.default_destination = matches.get_one::<String>(ARG_DEFAULT_DESTINATION).cloned();
    if let Some(seconds) = matches.get_one::<u64>(ARG_TIMEOUT_SECONDS) {
        globals.timeout_seconds = *seconds;
    }
    Ok(globals)
}

fn password(matches: &clap::ArgMatches) -> Result<SecretString> {
    matches
        .get_one::<String>(account::ARG_PASSWORD)
        .map(|password| SecretString::from(password.clone()))
        .context("missing required argument: --password")
}

fn service_referer(matches: &clap::ArgMatches) -> Option<String> {
    matches
        .get_one::<String>(account::ARG_SERVICE_REFERER)
        .map(|referer| referer.trim().to_string())
        .filter(|referer| !referer.is_empty())
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some((account::CMD_WHOAMI, _)) => Ok(Action::Whoami(whoami::Args { globals })),
        Some((account::CMD_LOGIN, sub_m)) => Ok(Action::Login(login::Args {
            globals,
            username: sub_m
                .get_one::<String>(account::ARG_USERNAME)
                .cloned()
                .context("missing required argument: --username")?,
            password: password(sub_m)?,
            remember_me: !sub_m.get_flag(account::ARG_NO_REMEMBER_ME),
            service_referer: service_referer(sub_m),
        })),
        Some((account::CMD_LOGOUT, sub_m)) => Ok(Action::Logout(logout::Args {
            globals,
            service_referer: service_referer(sub_m),
        })),
        Some((account::CMD_RESET_PASSWORD, sub_m)) => {
            Ok(Action::ResetPassword(reset_password::Args {
                globals,
                key: sub_m
                    .get_one::<String>(account::ARG_KEY)
                    .cloned()
                    .context("missing required argument: --key")?,
                password: password(sub_m)?,
            }))
        }
        Some((account::CMD_FORGOT_PASSWORD, sub_m)) => {
            Ok(Action::ForgotPassword(forgot_password::Args {
                globals,
                username: sub_m
                    .get_one::<String>(account::ARG_USERNAME)
                    .cloned()
                    .context("missing required argument: --username")?,
            }))
        }
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("missing command"),
    }
}
