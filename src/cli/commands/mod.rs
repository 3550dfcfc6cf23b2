pub mod backends;
pub mod logging;
pub mod session;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";

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

    let command = Command::new("farma4u-admin")
        .about("Farma4U administrative dashboard")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("3000")
                .env("FARMA4U_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = backends::with_args(command);
    let command = session::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 5] = [
        "farma4u-admin",
        "--api-url",
        "https://api.farma4u.com.br",
        "--hotsite-api-url",
        "https://hotsite.farma4u.com.br",
    ];

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "farma4u-admin");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Farma4U administrative dashboard".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_missing_api_urls() {
        temp_env::with_vars(
            [
                ("FARMA4U_API_URL", None::<&str>),
                ("FARMA4U_HOTSITE_API_URL", None::<&str>),
            ],
            || {
                let result = new().try_get_matches_from(["farma4u-admin"]);
                assert!(result.is_err());
            },
        );
    }

    #[test]
    fn test_default_port() {
        temp_env::with_vars([("FARMA4U_PORT", None::<&str>)], || {
            let matches = new().get_matches_from(REQUIRED);
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(3000));
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("FARMA4U_PORT", Some("8443")),
                ("FARMA4U_API_URL", Some("https://api.farma4u.com.br")),
                ("FARMA4U_HOTSITE_API_URL", Some("https://hotsite.farma4u.com.br")),
                ("FARMA4U_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(["farma4u-admin"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8443));
                assert_eq!(
                    matches
                        .get_one::<String>(backends::ARG_API_URL)
                        .map(String::as_str),
                    Some("https://api.farma4u.com.br")
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_u8 {
            temp_env::with_vars([("FARMA4U_LOG_LEVEL", None::<&str>)], || {
                let mut args: Vec<String> = REQUIRED.iter().map(ToString::to_string).collect();
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(usize::from(index))));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index)
                );
            });
        }
    }
}
