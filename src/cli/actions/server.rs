use crate::{
    admin::{self, AdminConfig},
    cli::telemetry,
    session::SessionCookieConfig,
};
use anyhow::Result;
use std::time::Duration;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_url: String,
    pub hotsite_api_url: String,
    pub request_timeout: Duration,
    pub session_cookie_name: String,
    pub session_cookie_secure: bool,
}

impl Args {
    fn config(&self) -> AdminConfig {
        AdminConfig::new(self.api_url.clone(), self.hotsite_api_url.clone())
            .with_port(self.port)
            .with_request_timeout(self.request_timeout)
            .with_session_cookie(
                SessionCookieConfig::new(self.session_cookie_name.clone())
                    .with_secure(self.session_cookie_secure),
            )
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the upstream clients cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let result = admin::new(args.config()).await;

    telemetry::shutdown_tracer();

    result
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("api_url", args.api_url.clone()),
        ("hotsite_api_url", args.hotsite_api_url.clone()),
        (
            "request_timeout",
            format!("{}s", args.request_timeout.as_secs()),
        ),
        ("session_cookie", args.session_cookie_name.clone()),
        ("session_cookie_secure", args.session_cookie_secure.to_string()),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn banner() -> String {
    format!(
        "farma4u-admin - {} - {}",
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    trimmed.chars().take(7).collect()
}
