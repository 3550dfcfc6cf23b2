pub mod clients;
pub mod health;
pub mod login;
pub mod pages;

use axum::http::StatusCode;

use crate::api::{Failure, FailureKind};
use crate::navigation::{sidebar, NavSection};
use crate::session::{RequestSession, SessionStore};

/// Status used when a page re-renders after an upstream failure.
fn failure_status(failure: &Failure) -> StatusCode {
    match failure.kind {
        FailureKind::Unauthorized => StatusCode::UNAUTHORIZED,
        FailureKind::Status(code) if (400..500).contains(&code) => {
            StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
        }
        FailureKind::Application => StatusCode::UNPROCESSABLE_ENTITY,
        FailureKind::Transport | FailureKind::Status(_) | FailureKind::Decode => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// Sidebar and display name for the signed-in user.
fn chrome(session: &RequestSession, path: &str) -> (Vec<NavSection>, String) {
    match session.read() {
        Some(session) => (
            sidebar(session.user.role(), path),
            session.user.display_name(),
        ),
        None => (sidebar(None, path), String::new()),
    }
}
