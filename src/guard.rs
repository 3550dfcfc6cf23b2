//! Route guard: authentication check and default-section redirect.
//!
//! Every request runs through [`route_guard`] before reaching a page handler.
//! The decision itself is [`evaluate`], a pure function of the path and
//! whether a session cookie was present.

use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::session::{removal_cookie, RequestSession, SessionCookieConfig};

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_SECTION_PATH: &str = "/painel/associados";

/// Paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH];

/// Paths that redirect to the default section once signed in.
const SECTION_ROOTS: &[&str] = &["/", "/painel"];

const EXEMPT_PATHS: &[&str] = &["/health", "/favicon.ico"];
const STATIC_PREFIX: &str = "/static/";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GuardDecision {
    /// Asset or probe; no session work at all.
    Exempt,
    Proceed,
    Redirect(&'static str),
}

/// Health probes and static assets skip the guard entirely.
#[must_use]
pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path) || path.starts_with(STATIC_PREFIX)
}

/// Decide what to do with a request for `path`.
#[must_use]
pub fn evaluate(path: &str, authenticated: bool) -> GuardDecision {
    if is_exempt(path) {
        return GuardDecision::Exempt;
    }

    let path = normalize(path);

    if PUBLIC_PATHS.contains(&path) {
        return GuardDecision::Proceed;
    }

    if !authenticated {
        return GuardDecision::Redirect(LOGIN_PATH);
    }

    if SECTION_ROOTS.contains(&path) {
        return GuardDecision::Redirect(DEFAULT_SECTION_PATH);
    }

    GuardDecision::Proceed
}

// `/painel/` matches `/painel`; the root stays `/`.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some("") | None => path,
        Some(trimmed) => trimmed,
    }
}

/// Axum middleware wrapping [`evaluate`].
///
/// Inserts the [`RequestSession`] into request extensions and, once the
/// handler returns, appends the removal cookie if the session was cleared.
pub async fn route_guard(
    State(cookie_config): State<Arc<SessionCookieConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_exempt(&path) {
        return next.run(request).await;
    }

    let session = RequestSession::from_headers(request.headers(), &cookie_config);

    match evaluate(&path, session.is_authenticated()) {
        GuardDecision::Redirect(target) => {
            debug!(path = %path, target, "Redirecting");
            Redirect::to(target).into_response()
        }
        GuardDecision::Exempt | GuardDecision::Proceed => {
            request.extensions_mut().insert(session.clone());
            let mut response = next.run(request).await;

            if session.is_cleared() {
                let removal = removal_cookie(&cookie_config);
                match HeaderValue::from_str(&removal.encoded().to_string()) {
                    Ok(value) => {
                        response.headers_mut().append(SET_COOKIE, value);
                    }
                    Err(err) => error!("Failed to encode session removal cookie: {err}"),
                }
            }

            response
        }
    }
}
