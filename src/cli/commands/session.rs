use clap::{builder::BoolishValueParser, Arg, ArgAction, ArgMatches, Command};

use crate::session::DEFAULT_SESSION_COOKIE_NAME;

pub const ARG_SESSION_COOKIE_NAME: &str = "session-cookie-name";
pub const ARG_SESSION_COOKIE_SECURE: &str = "session-cookie-secure";

#[derive(Debug, Clone)]
pub struct Options {
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl Options {
    /// Parse session cookie arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the cookie name is blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let cookie_name = matches
            .get_one::<String>(ARG_SESSION_COOKIE_NAME)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("missing required argument: --{ARG_SESSION_COOKIE_NAME}")
            })?;

        Ok(Self {
            cookie_name,
            cookie_secure: matches
                .get_one::<bool>(ARG_SESSION_COOKIE_SECURE)
                .copied()
                .unwrap_or(false),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_COOKIE_NAME)
                .long(ARG_SESSION_COOKIE_NAME)
                .help("Name of the cookie holding the session")
                .env("FARMA4U_SESSION_COOKIE_NAME")
                .default_value(DEFAULT_SESSION_COOKIE_NAME),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE_SECURE)
                .long(ARG_SESSION_COOKIE_SECURE)
                .help("Mark the session cookie Secure (serve over HTTPS)")
                .env("FARMA4U_SESSION_COOKIE_SECURE")
                .action(ArgAction::Set)
                .num_args(0..=1)
                .default_value("false")
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        with_args(Command::new("test"))
    }

    #[test]
    fn defaults() -> anyhow::Result<()> {
        temp_env::with_vars(
            [
                ("FARMA4U_SESSION_COOKIE_NAME", None::<&str>),
                ("FARMA4U_SESSION_COOKIE_SECURE", None::<&str>),
            ],
            || {
                let matches = command().get_matches_from(["test"]);
                let options = Options::parse(&matches)?;
                assert_eq!(options.cookie_name, DEFAULT_SESSION_COOKIE_NAME);
                assert!(!options.cookie_secure);
                Ok(())
            },
        )
    }

    #[test]
    fn secure_flag_without_value() -> anyhow::Result<()> {
        let matches = command().get_matches_from(["test", "--session-cookie-secure"]);
        assert!(Options::parse(&matches)?.cookie_secure);
        Ok(())
    }

    #[test]
    fn env_overrides() -> anyhow::Result<()> {
        temp_env::with_vars(
            [
                ("FARMA4U_SESSION_COOKIE_NAME", Some("f4u_admin")),
                ("FARMA4U_SESSION_COOKIE_SECURE", Some("yes")),
            ],
            || {
                let matches = command().get_matches_from(["test"]);
                let options = Options::parse(&matches)?;
                assert_eq!(options.cookie_name, "f4u_admin");
                assert!(options.cookie_secure);
                Ok(())
            },
        )
    }

    #[test]
    fn blank_cookie_name_is_rejected() {
        let matches = command().get_matches_from(["test", "--session-cookie-name", "  "]);
        assert!(Options::parse(&matches).is_err());
    }
}
