//! Session store seen by handlers and API clients.
//!
//! A [`RequestSession`] is built from the `Cookie` header of each incoming
//! request. The route guard and the handler share the same instance, so a
//! `clear()` issued by an API client on `401` is visible to the guard when it
//! finishes the response.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{cookie::decode_session, Session, SessionCookieConfig};

/// Read/clear access to the current session.
pub trait SessionStore: Send + Sync {
    /// Current session, if any.
    fn read(&self) -> Option<Session>;

    /// Drop the session; later reads return `None`.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct Slot {
    session: Option<Session>,
    cleared: bool,
}

/// Per-request session context. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct RequestSession {
    slot: Arc<Mutex<Slot>>,
}

impl RequestSession {
    /// Decode the session cookie from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, config: &SessionCookieConfig) -> Self {
        let jar = CookieJar::from_headers(headers);
        let session = jar
            .get(config.name())
            .and_then(|cookie| decode_session(cookie.value()));
        Self::with_session(session)
    }

    #[must_use]
    pub fn with_session(session: Option<Session>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                session,
                cleared: false,
            })),
        }
    }

    /// Context without a session, used for calls that must not carry a token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_some()
    }

    /// Whether `clear()` was called during this request.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.lock().cleared
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for RequestSession {
    fn read(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    fn clear(&self) {
        let mut slot = self.lock();
        slot.session = None;
        slot.cleared = true;
    }
}
