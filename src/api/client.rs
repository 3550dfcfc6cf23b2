//! HTTP client shared by the primary and hotsite backends.
//!
//! One implementation serves both backends; an instance only differs by its
//! [`Backend`] label and base URL. The session is passed per call, so the
//! token is always the one carried by the current request.

use anyhow::{anyhow, Context, Result};
use reqwest::{
    header::{HeaderMap, AUTHORIZATION},
    Client, StatusCode,
};
use serde_json::Value;
use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

use super::{request::RequestBody, ApiRequest, ClientError};
use crate::{session::SessionStore, APP_USER_AGENT};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream service a client talks to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    /// Main REST API (login, clients, associates, users).
    Primary,
    /// Microsite provisioning API.
    Hotsite,
}

impl Backend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Hotsite => "hotsite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw backend response.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Body as JSON; an empty body is `null`, a non-JSON body is `None`.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Some(Value::Null);
        }
        serde_json::from_slice(&self.body).ok()
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    backend: Backend,
    base_url: Arc<str>,
    http: Client,
}

impl ApiClient {
    /// Build a client for `backend` rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(backend: Backend, base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)
            .with_context(|| format!("Invalid {backend} API base URL: {base_url}"))?;
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            backend,
            base_url: Arc::from(base_url),
            http,
        })
    }

    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint relative to the base URL.
    ///
    /// # Errors
    /// Returns an error if the joined URL does not parse.
    pub fn url(&self, endpoint: &str) -> Result<Url, ClientError> {
        let joined = join_url(&self.base_url, endpoint);
        Url::parse(&joined).map_err(|source| ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Send a request, attaching the session's bearer token.
    ///
    /// A `401` answer clears the session before the response is returned.
    ///
    /// # Errors
    /// Returns an error when no response was received (connect failure,
    /// timeout, invalid endpoint or body).
    pub async fn send(
        &self,
        session: &dyn SessionStore,
        request: ApiRequest,
    ) -> Result<ApiResponse, ClientError> {
        let ApiRequest {
            endpoint,
            method,
            body,
            mut headers,
        } = request;

        let url = self.url(&endpoint)?;

        let token = session.read().map(|session| session.access_token().to_string());
        if token.is_some() {
            headers.remove(AUTHORIZATION);
        }

        let mut builder = self.http.request(method.to_method(), url).headers(headers);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => {
                builder.multipart(form.into_form().map_err(ClientError::Body)?)
            }
        };

        let span = info_span!(
            "api.request",
            backend = %self.backend,
            http.method = %method,
            endpoint = %endpoint
        );

        async {
            let response = builder.send().await?;
            let status = response.status();
            debug!("{} {} -> {}", method, endpoint, status);

            if status == StatusCode::UNAUTHORIZED {
                warn!("Backend rejected the session token, clearing session");
                session.clear();
            }

            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();

            Ok::<_, ClientError>(ApiResponse {
                status,
                headers,
                body,
            })
        }
        .instrument(span)
        .await
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("unsupported scheme {}", parsed.scheme()));
    }
    if parsed.host_str().is_none() {
        return Err(anyhow!("no host specified"));
    }
    Ok(trimmed.to_string())
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return base_url.to_string();
    }
    format!("{}/{}", base_url, endpoint.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{test_support::session, RequestSession};
    use reqwest::header::HeaderValue;
    use std::net::TcpListener;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client(base_url: &str) -> Result<ApiClient> {
        ApiClient::new(Backend::Primary, base_url, DEFAULT_TIMEOUT)
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(client("https://api.farma4u.com.br").is_ok());
        assert!(client("http://localhost:3333/v1/").is_ok());
        assert!(client("ftp://api.farma4u.com.br").is_err());
        assert!(client("api.farma4u.com.br").is_err());
        assert!(client("").is_err());
    }

    #[test]
    fn endpoints_join_with_single_slash() -> Result<()> {
        let api = client("http://localhost:3333/v1/")?;
        assert_eq!(api.base_url(), "http://localhost:3333/v1");
        assert_eq!(api.url("/client")?.as_str(), "http://localhost:3333/v1/client");
        assert_eq!(api.url("client")?.as_str(), "http://localhost:3333/v1/client");
        assert_eq!(api.url("")?.as_str(), "http://localhost:3333/v1");
        Ok(())
    }

    #[test]
    fn empty_body_reads_as_null() {
        let response = ApiResponse {
            status: StatusCode::NO_CONTENT,
            headers: HeaderMap::new(),
            body: Vec::new(),
        };
        assert_eq!(response.json(), Some(Value::Null));
    }

    #[tokio::test]
    async fn attaches_bearer_token_from_session() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/client"))
            .and(header("Authorization", "Bearer token-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server.uri())?;
        let store = RequestSession::with_session(Some(session("token-abc")));
        let response = api.send(&store, ApiRequest::get("/client")).await?;

        assert_eq!(response.status, StatusCode::OK);
        assert!(store.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn session_token_replaces_caller_authorization() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let api = client(&server.uri())?;
        let store = RequestSession::with_session(Some(session("from-session")));
        let request = ApiRequest::get("/me")
            .header(AUTHORIZATION, HeaderValue::from_static("Bearer from-caller"));
        api.send(&store, request).await?;

        let received = server.received_requests().await.unwrap_or_default();
        assert_eq!(received.len(), 1);
        let values: Vec<&str> = received[0]
            .headers
            .get_all("authorization")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        assert_eq!(values, ["Bearer from-session"]);
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_authorization() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let api = client(&server.uri())?;
        api.send(&RequestSession::anonymous(), ApiRequest::post("/login"))
            .await?;

        let received = server.received_requests().await.unwrap_or_default();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("authorization").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_response_clears_session() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/associate"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let api = client(&server.uri())?;
        let store = RequestSession::with_session(Some(session("expired")));
        let response = api.send(&store, ApiRequest::get("/associate")).await?;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(store.read().is_none());
        assert!(store.is_cleared());
        Ok(())
    }

    #[tokio::test]
    async fn other_errors_keep_session() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/client"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = client(&server.uri())?;
        let store = RequestSession::with_session(Some(session("token")));
        api.send(&store, ApiRequest::get("/client")).await?;

        assert!(store.is_authenticated());
        assert!(!store.is_cleared());
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() -> Result<()> {
        // Reserve a port, then release it so nothing is listening there.
        let port = match TcpListener::bind("127.0.0.1:0") {
            Ok(listener) => listener.local_addr()?.port(),
            Err(_) => {
                eprintln!("Skipping test: cannot bind localhost");
                return Ok(());
            }
        };

        let api = client(&format!("http://127.0.0.1:{port}"))?;
        let result = api
            .send(&RequestSession::anonymous(), ApiRequest::get("/client"))
            .await;

        assert!(matches!(result, Err(ClientError::Transport(_))));
        Ok(())
    }

    #[tokio::test]
    async fn slow_backend_times_out() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let api = ApiClient::new(Backend::Hotsite, &server.uri(), Duration::from_millis(50))?;
        let result = api
            .send(&RequestSession::anonymous(), ApiRequest::get("/slow"))
            .await;

        assert!(matches!(result, Err(ClientError::Timeout)));
        Ok(())
    }
}
