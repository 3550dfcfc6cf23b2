//! # Farma4U Admin (Dashboard Front End)
//!
//! `farma4u-admin` serves the administrative dashboard of the Farma4U
//! pharmacy-discount platform. Operators register and manage clients (merchant
//! partners), associates (members) and users. All business data lives behind
//! two upstream REST services; this crate owns the browser session and the
//! request pipeline towards those services.
//!
//! ## Session
//!
//! The signed-in user and the bearer token issued by the primary API are kept
//! in a single JSON cookie. Its presence is the only authorization signal: there
//! is no local expiry, the upstream API rejects stale tokens with `401`.
//!
//! - **Per-request context:** the cookie is decoded for every request into a
//!   [`session::RequestSession`]; nothing is parsed once at startup.
//! - **Teardown:** any upstream `401` clears the context, and the route guard
//!   sends a removal cookie with the response.
//!
//! ## Upstream APIs
//!
//! - **Primary API:** login, clients, associates and users.
//! - **Hotsite API:** provisions a client's public microsite (multipart upload).
//!
//! Both are reached through the same [`api::ApiClient`], parametrized by base
//! URL, and every call goes through [`api::dispatch`], which turns transport
//! failures, HTTP error statuses and application errors into values.

pub mod admin;
pub mod api;
pub mod cli;
pub mod clients;
pub mod guard;
pub mod navigation;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
