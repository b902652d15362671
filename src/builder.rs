use crate::client::OAuthClient;
use crate::error::{Error, Result};
use crate::v1::Credentials;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1/";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by every request of an [`OAuthClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Prefix of every request URL; endpoints are appended verbatim, followed by `.json`.
    pub api_url: url::Url,
    pub timeout: Duration,
    pub verify_peer: bool,
    /// Escape a `status` parameter starting with `@`.
    pub escape_leading_mention: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: url::Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            verify_peer: true,
            escape_leading_mention: true,
        }
    }
}

impl ClientConfig {
    /// Builds the transport handle described by this configuration.
    pub(crate) fn http_client(&self) -> Result<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_peer)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))
    }
}

/// Builder of [`OAuthClient`].
pub struct ClientBuilder {
    credentials: Credentials,
    api_url: Option<String>,
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        ClientBuilder {
            credentials,
            api_url: None,
            config: ClientConfig::default(),
        }
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn verify_peer(mut self, verify_peer: bool) -> Self {
        self.config.verify_peer = verify_peer;
        self
    }

    pub fn escape_leading_mention(mut self, escape: bool) -> Self {
        self.config.escape_leading_mention = escape;
        self
    }

    pub fn build(self) -> Result<OAuthClient> {
        let mut config = self.config;
        if let Some(api_url) = self.api_url {
            config.api_url = url::Url::parse(&api_url).map_err(|e| {
                Error::Configuration(format!("Invalid API URL {:?}: {}", api_url, e))
            })?;
        }
        let http = config.http_client()?;
        Ok(OAuthClient::from_parts(self.credentials, config, http))
    }
}
