//! reqwest-backed content API client.

use super::{ContentApi, Credential, Endpoint, HttpMethod};
use crate::config::ApiSettings;
use crate::error::{LeoError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Content API client speaking JSON over HTTP.
///
/// No retries and no backoff: a failed request surfaces immediately.
pub struct HttpContentApi {
    client: reqwest::Client,
    base_url: Url,
    auth_scheme: String,
}

impl HttpContentApi {
    /// Create a client for the given base URL with the HTTP client's default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, "Bearer", None)
    }

    /// Create a client from the `[api]` settings section.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        Self::build(
            &settings.base_url,
            &settings.auth_scheme,
            settings.timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(base_url: &str, auth_scheme: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LeoError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            auth_scheme: auth_scheme.to_string(),
        })
    }

    /// Resolve an endpoint against the base URL, keeping any path prefix.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, endpoint.path()))
            .map_err(|e| LeoError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))
    }

    fn authorization(&self, credential: &Credential) -> String {
        format!("{} {}", self.auth_scheme, credential.token())
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    #[instrument(skip(self, payload, credential), fields(method = %method, endpoint = %endpoint))]
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        payload: Option<&Value>,
        credential: &Credential,
    ) -> Result<Value> {
        let url = self.url_for(endpoint)?;

        let mut request = self
            .client
            .request(method.into(), url)
            .header(AUTHORIZATION, self.authorization(credential))
            .header(ACCEPT, "application/json");

        if let Some(body) = payload {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!("Content API answered {} ({} bytes)", status, text.len());

        if !status.is_success() {
            return Err(LeoError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            LeoError::UnexpectedResponse(format!("{} returned invalid JSON: {}", endpoint, e))
        })
    }
}
