use clap::{Arg, ArgAction, Command};

pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_RESET_PASSWORD: &str = "reset-password";
pub const CMD_FORGOT_PASSWORD: &str = "forgot-password";

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NO_REMEMBER_ME: &str = "no-remember-me";
pub const ARG_SERVICE_REFERER: &str = "service-referer";
pub const ARG_KEY: &str = "key";

fn service_referer() -> Arg {
    Arg::new(ARG_SERVICE_REFERER)
        .long("service-referer")
        .help("URL of the calling service, used as the post-login destination")
        .env("IDENTITY_UI_SERVICE_REFERER")
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long("password")
        .help("Password (prefer the environment variable)")
        .env("IDENTITY_UI_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_WHOAMI).about("Resolve and print the current identity"),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in and print the post-login destination")
                .arg(
                    Arg::new(ARG_USERNAME)
                        .short('u')
                        .long("username")
                        .help("Login name")
                        .env("IDENTITY_UI_USERNAME")
                        .required(true),
                )
                .arg(password())
                .arg(
                    Arg::new(ARG_NO_REMEMBER_ME)
                        .long("no-remember-me")
                        .help("Do not ask the backend for a persistent session")
                        .action(ArgAction::SetTrue),
                )
                .arg(service_referer()),
        )
        .subcommand(
            Command::new(CMD_LOGOUT)
                .about("End the session and print the login route")
                .arg(service_referer()),
        )
        .subcommand(
            Command::new(CMD_RESET_PASSWORD)
                .about("Set a new password with the key from a reset email")
                .arg(
                    Arg::new(ARG_KEY)
                        .short('k')
                        .long("key")
                        .help("Reset key from the emailed link")
                        .required(true),
                )
                .arg(password()),
        )
        .subcommand(
            Command::new(CMD_FORGOT_PASSWORD)
                .about("Ask the backend to email a password reset link")
                .arg(
                    Arg::new(ARG_USERNAME)
                        .short('u')
                        .long("username")
                        .help("Login name")
                        .env("IDENTITY_UI_USERNAME")
                        .required(true),
                ),
        )
}
