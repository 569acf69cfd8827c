//! Shared HTTP session for all gateway clients.

use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::config::DialConfig;
use super::constants::API_KEY_HEADER;
use super::error::DialError;

/// Timeouts applied to every request of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Total time for one request, including reading the body. Kept generous
    /// so large binary transfers can finish.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// A fully buffered gateway response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    async fn read(res: reqwest::Response) -> Result<Self, DialError> {
        let status = res.status();
        let body = res.bytes().await.map_err(|e| DialError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        debug!(status = %status, bytes = body.len(), "HTTP response received");

        Ok(Self {
            status: status.as_u16(),
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        StatusCode::from_u16(self.status).is_ok_and(|status| status.is_success())
    }

    /// Turn a non-2xx response into [`DialError::Http`], keeping the body text.
    pub fn error_for_status(self) -> Result<Self, DialError> {
        if self.is_success() {
            return Ok(self);
        }

        warn!(status = self.status, "Gateway returned error status");

        let message = if self.body.is_empty() {
            StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            String::from_utf8_lossy(&self.body).into_owned()
        };

        Err(DialError::Http {
            status: self.status,
            message,
        })
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DialError> {
        serde_json::from_slice(&self.body).map_err(|e| DialError::Parse {
            message: "Failed to parse response as JSON".to_string(),
            source: Box::new(e),
        })
    }
}

/// reqwest client bound to one gateway base address and API key.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &DialConfig) -> Result<Self, DialError> {
        let mut api_key = HeaderValue::from_str(&config.api_key).map_err(|e| {
            DialError::Configuration(format!("API key is not a valid header value: {e}"))
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .timeout(config.http_config.timeout)
            .connect_timeout(config.http_config.connect_timeout)
            .user_agent(format!("dial-client/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                DialError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a gateway path. Exactly one `/` separates the two parts.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[tracing::instrument(name = "http_get", skip(self), err)]
    pub async fn get(&self, path: &str) -> Result<RawResponse, DialError> {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| network_error("GET", e))?;

        RawResponse::read(res).await
    }

    #[tracing::instrument(name = "http_post_json", skip(self, body), err)]
    pub async fn post_json<Req: Serialize>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<RawResponse, DialError> {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| network_error("POST", e))?;

        RawResponse::read(res).await
    }

    #[tracing::instrument(name = "http_put_multipart", skip(self, form), err)]
    pub async fn put_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<RawResponse, DialError> {
        let res = self
            .client
            .put(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| network_error("PUT", e))?;

        RawResponse::read(res).await
    }
}

fn network_error(method: &str, e: reqwest::Error) -> DialError {
    let message = if e.is_timeout() {
        format!("{method} request timed out")
    } else if e.is_connect() {
        format!("{method} request could not connect")
    } else {
        format!("{method} request failed")
    };

    DialError::Network {
        message,
        source: Box::new(e),
    }
}
