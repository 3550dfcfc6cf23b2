use anyhow::Result;
use std::sync::Arc;

use super::AdminConfig;
use crate::api::{ApiClient, Backend};
use crate::session::SessionCookieConfig;

/// Shared by every handler: cookie settings and one client per backend.
#[derive(Clone, Debug)]
pub struct AdminState {
    session_cookie: Arc<SessionCookieConfig>,
    primary: ApiClient,
    hotsite: ApiClient,
    upload_limit_bytes: usize,
}

impl AdminState {
    /// Build both API clients from the configuration.
    ///
    /// # Errors
    /// Returns an error if either base URL is invalid.
    pub fn new(config: &AdminConfig) -> Result<Self> {
        let primary = ApiClient::new(Backend::Primary, config.api_url(), config.request_timeout())?;
        let hotsite = ApiClient::new(
            Backend::Hotsite,
            config.hotsite_api_url(),
            config.request_timeout(),
        )?;

        Ok(Self {
            session_cookie: Arc::new(config.session_cookie().clone()),
            primary,
            hotsite,
            upload_limit_bytes: config.upload_limit_bytes(),
        })
    }

    #[must_use]
    pub fn session_cookie(&self) -> Arc<SessionCookieConfig> {
        self.session_cookie.clone()
    }

    #[must_use]
    pub fn primary(&self) -> &ApiClient {
        &self.primary
    }

    #[must_use]
    pub fn hotsite(&self) -> &ApiClient {
        &self.hotsite
    }

    #[must_use]
    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_bytes
    }
}
