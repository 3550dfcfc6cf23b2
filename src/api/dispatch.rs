//! Uniform success/failure results for backend calls.

use reqwest::{header::HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::{ApiClient, ApiRequest};
use crate::session::SessionStore;

/// Message shown when the backend gives no usable explanation.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    /// No response: connection refused, timeout, invalid request.
    Transport,
    /// `401`; the session has already been cleared.
    Unauthorized,
    /// Any other non-2xx status.
    Status(u16),
    /// 2xx answer whose body flags `"error": true`.
    Application,
    /// 2xx answer whose body does not match the expected shape.
    Decode,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    fn new(kind: FailureKind, message: Option<String>) -> Self {
        Self {
            kind,
            message: message.unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        }
    }

    /// The request could not be built, so nothing was sent.
    #[must_use]
    pub fn unsent() -> Self {
        Self::new(FailureKind::Transport, None)
    }
}

/// Outcome of [`dispatch`].
#[derive(Clone, Debug)]
pub enum RequestResult<D> {
    Success {
        data: D,
        headers: HeaderMap,
        message: Option<String>,
    },
    Failure(Failure),
}

impl<D> RequestResult<D> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Backend message for either outcome.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failure(failure) => Some(&failure.message),
        }
    }

    /// Drop headers and message, keeping only the data or the failure.
    ///
    /// # Errors
    /// Returns the failure when the call did not succeed.
    pub fn into_result(self) -> Result<D, Failure> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Send `request` through `client` and classify the outcome.
///
/// Never fails: transport errors, error statuses and application errors all
/// come back as [`RequestResult::Failure`].
pub async fn dispatch<D: DeserializeOwned>(
    client: &ApiClient,
    session: &dyn SessionStore,
    request: ApiRequest,
) -> RequestResult<D> {
    let method = request.method;
    let endpoint = request.endpoint.clone();
    let backend = client.backend();

    let response = match client.send(session, request).await {
        Ok(response) => response,
        Err(err) => {
            error!(%backend, %method, endpoint, "Request failed: {err}");
            return RequestResult::Failure(Failure::new(FailureKind::Transport, None));
        }
    };

    let body = response.json();
    let message = body.as_ref().and_then(body_message);

    if !response.status.is_success() {
        let kind = if response.status == StatusCode::UNAUTHORIZED {
            FailureKind::Unauthorized
        } else {
            FailureKind::Status(response.status.as_u16())
        };
        warn!(%backend, %method, endpoint, status = %response.status, "Request rejected");
        return RequestResult::Failure(Failure::new(kind, message));
    }

    // A non-JSON 2xx body is offered to `D` as a plain string.
    let body = body.unwrap_or_else(|| {
        debug!(%backend, %method, endpoint, "Response body is not JSON");
        Value::String(String::from_utf8_lossy(&response.body).into_owned())
    });

    if body.get("error").and_then(Value::as_bool) == Some(true) {
        warn!(%backend, %method, endpoint, "Backend reported an application error");
        return RequestResult::Failure(Failure::new(FailureKind::Application, message));
    }

    match serde_json::from_value::<D>(body) {
        Ok(data) => RequestResult::Success {
            data,
            headers: response.headers,
            message,
        },
        Err(err) => {
            warn!(%backend, %method, endpoint, "Unexpected response shape: {err}");
            RequestResult::Failure(Failure::new(FailureKind::Decode, None))
        }
    }
}

fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
