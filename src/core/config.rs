use std::fmt;

use super::constants::{API_KEY_ENV_VAR, BASE_URL_ENV_VAR, DEFAULT_BASE_URL};
use super::error::DialError;
use super::http::HttpClientConfig;

/// Where the gateway API key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read from the `DIAL_API_KEY` environment variable.
    Default,
    Custom(String),
}

impl ApiKey {
    pub fn resolve(self) -> Result<String, DialError> {
        match self {
            ApiKey::Default => std::env::var(API_KEY_ENV_VAR).map_err(|_| {
                DialError::Configuration(format!("{API_KEY_ENV_VAR} not set."))
            }),
            ApiKey::Custom(key) => Ok(key),
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKey::Default => write!(f, "ApiKey::Default"),
            ApiKey::Custom(_) => write!(f, "ApiKey::Custom(<redacted>)"),
        }
    }
}

/// Connection settings shared by the bucket and model clients.
#[derive(Clone)]
pub struct DialConfig {
    pub api_key: String,
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl DialConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http_config: HttpClientConfig::default(),
        }
    }

    /// Build a config from `DIAL_API_KEY` and `DIAL_URL`, falling back to the
    /// public gateway address when `DIAL_URL` is unset.
    pub fn from_env() -> Result<Self, DialError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`DialConfig::from_env`], reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DialError> {
        let api_key = lookup(API_KEY_ENV_VAR)
            .ok_or_else(|| DialError::Configuration(format!("{API_KEY_ENV_VAR} not set.")))?;
        let base_url = lookup(BASE_URL_ENV_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(api_key, base_url))
    }

    pub fn with_api_key(mut self, api_key: ApiKey) -> Result<Self, DialError> {
        self.api_key = api_key.resolve()?;
        Ok(self)
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

impl fmt::Debug for DialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("http_config", &self.http_config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = DialConfig::new("super-secret", "http://localhost:8080");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("http://localhost:8080"));
        assert_eq!(
            format!("{:?}", ApiKey::Custom("super-secret".into())),
            "ApiKey::Custom(<redacted>)"
        );
    }

    #[test]
    fn custom_api_key_resolves_verbatim() {
        let config = DialConfig::new("old", "http://localhost")
            .with_api_key(ApiKey::Custom("new".to_string()))
            .unwrap();
        assert_eq!(config.api_key, "new");
    }

    #[test]
    fn defaults_use_long_transfer_timeout() {
        let config = DialConfig::new("key", "http://localhost");
        assert_eq!(config.http_config.timeout, Duration::from_secs(60));
        assert_eq!(config.http_config.connect_timeout, Duration::from_secs(10));
    }

    // --- Tests: environment lookup ---

    #[test]
    fn reads_key_and_url_from_variables() {
        let env = vars(&[
            ("DIAL_API_KEY", "env-key"),
            ("DIAL_URL", "http://gateway.local"),
        ]);
        let config = DialConfig::from_vars(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://gateway.local");
    }

    #[test]
    fn unset_url_falls_back_to_public_gateway() {
        let env = vars(&[("DIAL_API_KEY", "env-key")]);
        let config = DialConfig::from_vars(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        let env = vars(&[("DIAL_URL", "http://gateway.local")]);
        let result = DialConfig::from_vars(|name| env.get(name).cloned());

        match result {
            Err(DialError::Configuration(message)) => assert!(message.contains("DIAL_API_KEY")),
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }
}
