pub mod account;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_DEFAULT_DESTINATION: &str = "default-destination";
pub const ARG_TIMEOUT_SECONDS: &str = "timeout-seconds";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("identity-ui")
        .about("Identity management session client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long("api-base-url")
                .help("Base URL of the identity backend, example: https://ims.example.org/")
                .env("IDENTITY_UI_API_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_DEFAULT_DESTINATION)
                .long("default-destination")
                .help("Post-login destination when no service referer is given")
                .env("IDENTITY_UI_DEFAULT_DESTINATION")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT_SECONDS)
                .long("timeout-seconds")
                .help("HTTP request timeout in seconds")
                .env("IDENTITY_UI_TIMEOUT_SECONDS")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        );

    let command = logging::with_args(command);
    account::with_subcommands(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://ims.example.org/";

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "identity-ui");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Identity management session client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_subcommand_required() {
        let result = new().try_get_matches_from(["identity-ui", "--api-base-url", BASE]);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars(
            [
                ("IDENTITY_UI_PASSWORD", None::<&str>),
                ("IDENTITY_UI_SERVICE_REFERER", None::<&str>),
            ],
            || {
                let matches = new().get_matches_from([
                    "identity-ui",
                    "login",
                    "--api-base-url",
                    BASE,
                    "--username",
                    "jdoe",
                    "--password",
                    "s3cret",
                    "--no-remember-me",
                    "--service-referer",
                    "https://x.example/y",
                ]);

                assert_eq!(
                    matches.get_one::<String>(ARG_API_BASE_URL).cloned(),
                    Some(BASE.to_string())
                );
                let Some((name, login)) = matches.subcommand() else {
                    panic!("missing subcommand");
                };
                assert_eq!(name, account::CMD_LOGIN);
                assert_eq!(
                    login.get_one::<String>(account::ARG_USERNAME).cloned(),
                    Some("jdoe".to_string())
                );
                assert!(login.get_flag(account::ARG_NO_REMEMBER_ME));
                assert_eq!(
                    login.get_one::<String>(account::ARG_SERVICE_REFERER).cloned(),
                    Some("https://x.example/y".to_string())
                );
            },
        );
    }

    #[test]
    fn test_login_requires_password() {
        temp_env::with_vars([("IDENTITY_UI_PASSWORD", None::<&str>)], || {
            let result = new().try_get_matches_from(["identity-ui", "login", "-u", "jdoe"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("IDENTITY_UI_API_BASE_URL", Some(BASE)),
                ("IDENTITY_UI_TIMEOUT_SECONDS", Some("3")),
                ("IDENTITY_UI_USERNAME", Some("jdoe")),
                ("IDENTITY_UI_PASSWORD", Some("s3cret")),
                ("IDENTITY_UI_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(["identity-ui", "login"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_BASE_URL).cloned(),
                    Some(BASE.to_string())
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT_SECONDS).copied(), Some(3));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
                let login = matches.subcommand_matches(account::CMD_LOGIN);
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(account::ARG_PASSWORD).cloned()),
                    Some("s3cret".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("IDENTITY_UI_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(["identity-ui", "whoami"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("IDENTITY_UI_LOG_LEVEL", None::<&str>)], || {
                let mut args = vec!["identity-ui".to_string(), "whoami".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_timeout_default() {
        temp_env::with_vars([("IDENTITY_UI_TIMEOUT_SECONDS", None::<&str>)], || {
            let matches = new().get_matches_from(["identity-ui", "whoami"]);
            assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT_SECONDS).copied(), Some(10));
        });
    }
}
