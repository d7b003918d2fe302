//! Transport for the Nagios XI REST API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::{ClientError, Resource};

/// Path of the v1 REST API below the web server root.
pub const API_PREFIX: &str = "/nagiosxi/api/v1";

/// Applied to every request unless the builder overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_USER_AGENT: &str = concat!("nagios-exporter/", env!("CARGO_PKG_VERSION"));

/// Source of raw resource bodies.
///
/// [`NagiosClient`] is the production implementation; tests swap in
/// canned responses.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the raw body of `resource`.
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, ClientError>;
}

/// Authenticated client for one Nagios XI instance.
#[derive(Clone)]
pub struct NagiosClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for NagiosClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NagiosClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl NagiosClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> NagiosClientBuilder {
        NagiosClientBuilder::default()
    }

    /// API base URL for a Nagios XI host, e.g. `http://nagios/nagiosxi/api/v1`.
    pub fn base_url(scheme: &str, address: &str) -> String {
        format!(
            "{}://{}{}",
            scheme,
            address.trim_end_matches('/'),
            API_PREFIX
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `GET` one resource and return its body.
    ///
    /// Non-2xx responses fail with [`ClientError::HttpStatus`] without
    /// reading the body.
    pub async fn get(&self, resource: Resource) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{}", self.endpoint, resource.path());

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                resource,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Backend for NagiosClient {
    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, ClientError> {
        self.get(resource).await
    }
}

/// Builder for NagiosClient.
#[derive(Debug, Default)]
pub struct NagiosClientBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NagiosClientBuilder {
    /// Set the API base URL (see [`NagiosClient::base_url`]).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the key sent as the `apikey` query parameter.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the per-request timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header (default: `nagios-exporter/<version>`).
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<NagiosClient, ClientError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| NagiosClient::base_url("http", "localhost"));
        let endpoint = endpoint.trim_end_matches('/').to_string();

        let url = Url::parse(&endpoint)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint(format!(
                "{endpoint}: unsupported scheme {}",
                url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .build()?;

        Ok(NagiosClient {
            client,
            endpoint,
            api_key: self.api_key.unwrap_or_default(),
        })
    }
}
