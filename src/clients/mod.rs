//! Client (merchant partner) registration.
//!
//! A registration is two upstream calls: the client record on the primary API,
//! then its microsite on the hotsite API. The second call only happens when
//! the first succeeded, and its failure does not undo the client.

pub mod form;
pub mod hotsite;

pub use form::{ClientStatus, FieldError, NewClient, NewClientForm, FIELDS, SEGMENTS};
pub use hotsite::{site_form, ImageUpload, ADD_SITE_ENDPOINT};

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{info, warn};

use crate::api::{dispatch, ApiClient, ApiRequest, Failure, RequestResult};
use crate::session::SessionStore;

pub const CLIENT_ENDPOINT: &str = "/client";

const DEFAULT_SUCCESS_MESSAGE: &str = "Cliente cadastrado com sucesso.";

/// Identifier returned by `POST /client`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum ClientId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientCreated {
    client_id: ClientId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Client created. `hotsite` holds the provisioning failure, if any.
    Registered {
        client_id: ClientId,
        message: String,
        hotsite: Option<Failure>,
    },
    /// Client not created; nothing was sent to the hotsite API.
    Rejected(Failure),
}

impl RegistrationOutcome {
    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Registered { message, .. } => message,
            Self::Rejected(failure) => &failure.message,
        }
    }
}

/// Create the client, then provision its microsite.
pub async fn register_client(
    primary: &ApiClient,
    hotsite: &ApiClient,
    session: &dyn SessionStore,
    client: &NewClient,
    image: Option<ImageUpload>,
) -> RegistrationOutcome {
    let request = match ApiRequest::post(CLIENT_ENDPOINT).json(client) {
        Ok(request) => request,
        Err(err) => {
            warn!("Failed to encode client registration: {err}");
            return RegistrationOutcome::Rejected(Failure::unsent());
        }
    };

    let (client_id, message) = match dispatch::<ClientCreated>(primary, session, request).await {
        RequestResult::Success { data, message, .. } => (data.client_id, message),
        RequestResult::Failure(failure) => return RegistrationOutcome::Rejected(failure),
    };

    info!(client_id = %client_id, "Client registered");

    let site = site_form(&client_id.to_string(), client, image);
    let hotsite_failure = match dispatch::<Value>(
        hotsite,
        session,
        ApiRequest::post(ADD_SITE_ENDPOINT).multipart(site),
    )
    .await
    {
        RequestResult::Success { .. } => None,
        RequestResult::Failure(failure) => {
            warn!(client_id = %client_id, kind = ?failure.kind, "Hotsite provisioning failed: {}", failure.message);
            Some(failure)
        }
    };

    RegistrationOutcome::Registered {
        client_id,
        message: message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
        hotsite: hotsite_failure,
    }
}
