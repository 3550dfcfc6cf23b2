//! Session cookie encoding.
//!
//! The cookie value is the session JSON; the jar percent-encodes it on the way
//! out and decodes it on the way in.

use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::debug;

use super::Session;

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "farma4u_session";

/// Name and flags of the session cookie.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionCookieConfig {
    name: String,
    secure: bool,
}

impl SessionCookieConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secure: false,
        }
    }

    /// Only mark cookies secure when the dashboard is served over HTTPS.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn secure(&self) -> bool {
        self.secure
    }

    fn build(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE_NAME)
    }
}

impl Session {
    /// Build the `Set-Cookie` entry that establishes this session.
    ///
    /// # Errors
    /// Returns an error if the session cannot be serialized.
    pub fn to_cookie(&self, config: &SessionCookieConfig) -> Result<Cookie<'static>, serde_json::Error> {
        Ok(config.build(self.to_json()?))
    }
}

/// Cookie that tells the browser to drop the session.
#[must_use]
pub fn removal_cookie(config: &SessionCookieConfig) -> Cookie<'static> {
    let mut cookie = config.build(String::new());
    cookie.make_removal();
    cookie
}

/// Decode a cookie value; malformed values count as no session.
pub(super) fn decode_session(value: &str) -> Option<Session> {
    if value.trim().is_empty() {
        return None;
    }
    match Session::from_json(value) {
        Ok(session) => Some(session),
        Err(err) => {
            debug!("Ignoring malformed session cookie: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::session;

    #[test]
    fn session_cookie_flags() -> Result<(), serde_json::Error> {
        let config = SessionCookieConfig::new("f4u").with_secure(true);
        let cookie = session("token").to_cookie(&config)?;

        assert_eq!(cookie.name(), "f4u");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        Ok(())
    }

    #[test]
    fn cookie_value_round_trips() -> Result<(), serde_json::Error> {
        let original = session("token-xyz");
        let cookie = original.to_cookie(&SessionCookieConfig::default())?;
        let parsed = Cookie::parse_encoded(cookie.encoded().to_string())
            .map(Cookie::into_owned)
            .ok();
        let decoded = parsed.and_then(|cookie| decode_session(cookie.value()));

        assert!(decoded.is_some());
        if let Some(decoded) = decoded {
            assert_eq!(decoded.user, original.user);
            assert_eq!(decoded.access_token(), "token-xyz");
        }
        Ok(())
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie(&SessionCookieConfig::default());
        assert_eq!(cookie.name(), DEFAULT_SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }

    #[test]
    fn malformed_values_are_no_session() {
        assert!(decode_session("").is_none());
        assert!(decode_session("not-json").is_none());
        assert!(decode_session(r#"{"user":{}}"#).is_none());
    }
}
