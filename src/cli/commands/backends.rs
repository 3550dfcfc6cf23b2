use anyhow::{anyhow, Context};
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_HOTSITE_API_URL: &str = "hotsite-api-url";
pub const ARG_REQUEST_TIMEOUT: &str = "request-timeout";

#[derive(Debug, Clone)]
pub struct Options {
    pub api_url: String,
    pub hotsite_api_url: String,
    pub request_timeout: Duration,
}

impl Options {
    /// Parse upstream API arguments from matches.
    ///
    /// # Errors
    /// Returns an error if a base URL is missing or not an http(s) URL with a host.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read_url = |id: &str| -> anyhow::Result<String> {
            let value = matches
                .get_one::<String>(id)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("missing required argument: --{id}"))?;
            validate_base_url(&value).with_context(|| format!("invalid --{id}: {value}"))?;
            Ok(value)
        };

        let seconds = matches
            .get_one::<u64>(ARG_REQUEST_TIMEOUT)
            .copied()
            .unwrap_or(10);

        Ok(Self {
            api_url: read_url(ARG_API_URL)?,
            hotsite_api_url: read_url(ARG_HOTSITE_API_URL)?,
            request_timeout: Duration::from_secs(seconds),
        })
    }
}

fn validate_base_url(value: &str) -> anyhow::Result<()> {
    let parsed = Url::parse(value)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(anyhow!("URL must include a host"));
    }
    Ok(())
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the primary API, example: https://api.farma4u.com.br")
                .env("FARMA4U_API_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_HOTSITE_API_URL)
                .long(ARG_HOTSITE_API_URL)
                .help("Base URL of the hotsite provisioning API")
                .env("FARMA4U_HOTSITE_API_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_REQUEST_TIMEOUT)
                .long(ARG_REQUEST_TIMEOUT)
                .help("Timeout for each upstream request, in seconds")
                .env("FARMA4U_REQUEST_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
