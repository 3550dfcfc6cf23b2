//! Map parsed CLI arguments to the action to run.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{backends, session, ARG_PORT};
use crate::admin::DEFAULT_PORT;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches
        .get_one::<u16>(ARG_PORT)
        .copied()
        .unwrap_or(DEFAULT_PORT);

    let backend_opts = backends::Options::parse(matches)?;
    let session_opts = session::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        api_url: backend_opts.api_url,
        hotsite_api_url: backend_opts.hotsite_api_url,
        request_timeout: backend_opts.request_timeout,
        session_cookie_name: session_opts.cookie_name,
        session_cookie_secure: session_opts.cookie_secure,
    }))
}
