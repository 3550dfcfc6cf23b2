//! Signed-in user session carried in a single JSON cookie.
//!
//! Flow Overview: the primary API issues `{ user, accessToken }` on login, the
//! login handler stores it as the session cookie, and every later request
//! decodes it into a [`RequestSession`]. The access token is wrapped in a
//! [`SecretString`] so it never shows up in `Debug` output or logs.

mod cookie;
mod role;
mod store;

pub use cookie::{removal_cookie, SessionCookieConfig, DEFAULT_SESSION_COOKIE_NAME};
pub use role::Role;
pub use store::{RequestSession, SessionStore};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// User identifier as issued by the primary API (numeric or textual).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Profile of the signed-in user.
///
/// Fields the dashboard does not use are kept in `profile` so the cookie
/// round-trips without losing data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLogged {
    pub id: UserId,
    pub role_id: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl UserLogged {
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.role_id)
    }

    /// Name shown in the sidebar, falling back to the e-mail and then the id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .map_or_else(|| self.id.to_string(), ToString::to_string)
    }
}

/// Serialized session: the user profile plus the bearer token for the APIs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: UserLogged,
    #[serde(with = "secret_token")]
    access_token: SecretString,
}

impl Session {
    #[must_use]
    pub fn new(user: UserLogged, access_token: impl Into<String>) -> Self {
        Self {
            user,
            access_token: SecretString::from(access_token.into()),
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Decode a session from its JSON representation.
    ///
    /// # Errors
    /// Returns an error if the value is not a valid session document.
    pub fn from_json(value: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(value)
    }

    /// Encode the session as the JSON stored in the cookie.
    ///
    /// # Errors
    /// Returns an error if the profile cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

mod secret_token {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        token: &SecretString,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(token.expose_secret())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<SecretString, D::Error> {
        String::deserialize(deserializer).map(SecretString::from)
    }
}
