//! Server configuration assembled from CLI arguments.

use std::time::Duration;

use crate::api::DEFAULT_TIMEOUT;
use crate::session::SessionCookieConfig;

pub const DEFAULT_PORT: u16 = 3000;

/// Upload limit for the client registration form (logo included).
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AdminConfig {
    port: u16,
    api_url: String,
    hotsite_api_url: String,
    session_cookie: SessionCookieConfig,
    request_timeout: Duration,
    upload_limit_bytes: usize,
}

impl AdminConfig {
    #[must_use]
    pub fn new(api_url: String, hotsite_api_url: String) -> Self {
        Self {
            port: DEFAULT_PORT,
            api_url,
            hotsite_api_url,
            session_cookie: SessionCookieConfig::default(),
            request_timeout: DEFAULT_TIMEOUT,
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_session_cookie(mut self, session_cookie: SessionCookieConfig) -> Self {
        self.session_cookie = session_cookie;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_upload_limit_bytes(mut self, bytes: usize) -> Self {
        self.upload_limit_bytes = bytes;
        self
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn hotsite_api_url(&self) -> &str {
        &self.hotsite_api_url
    }

    #[must_use]
    pub fn session_cookie(&self) -> &SessionCookieConfig {
        &self.session_cookie
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AdminConfig::new(
            "https://api.farma4u.com.br".to_string(),
            "https://hotsite.farma4u.com.br".to_string(),
        );
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.request_timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.session_cookie(), &SessionCookieConfig::default());
        assert_eq!(config.upload_limit_bytes(), DEFAULT_UPLOAD_LIMIT_BYTES);
    }

    #[test]
    fn builders_override_defaults() {
        let config = AdminConfig::new(String::new(), String::new())
            .with_port(8080)
            .with_request_timeout(Duration::from_secs(3))
            .with_session_cookie(SessionCookieConfig::new("f4u").with_secure(true))
            .with_upload_limit_bytes(1024);

        assert_eq!(config.port(), 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.session_cookie().name(), "f4u");
        assert!(config.session_cookie().secure());
        assert_eq!(config.upload_limit_bytes(), 1024);
    }
}
