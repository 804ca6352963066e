//! Client configuration and request/response types.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::envelope::{self, ResponseEnvelope};
use crate::error::{ShipoutError, ShipoutResult};
use crate::signing::{encode_query, signing_path};

/// Production endpoint.
pub const PRODUCTION_ENDPOINT: &str = "https://open.shipout.com/api/";

/// Sandbox endpoint, used when `debug` is set.
pub const SANDBOX_ENDPOINT: &str = "https://opendev.shipout.com/api/";

/// Client configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ShipoutConfig {
    /// Application key, sent as the `appkey` header.
    #[serde(default)]
    pub app_key: String,

    /// Shared secret used to sign requests. Never sent.
    #[serde(default)]
    pub secret_key: String,

    /// Bearer token for the `Authorization` header.
    #[serde(default)]
    pub authorization: String,

    /// Use the sandbox endpoint and log request details.
    #[serde(default)]
    pub debug: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Explicit base URL; overrides the debug-selected endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_timeout() -> u64 {
    10
}

impl Default for ShipoutConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            secret_key: String::new(),
            authorization: String::new(),
            debug: false,
            timeout_secs: default_timeout(),
            endpoint: None,
        }
    }
}

impl fmt::Debug for ShipoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShipoutConfig")
            .field("app_key", &self.app_key)
            .field("secret_key", &"<redacted>")
            .field("authorization", &"<redacted>")
            .field("debug", &self.debug)
            .field("timeout_secs", &self.timeout_secs)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ShipoutConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `SHIPOUT_APP_KEY` | Application key |
    /// | `SHIPOUT_SECRET_KEY` | Signing secret |
    /// | `SHIPOUT_AUTHORIZATION` | Bearer token |
    /// | `SHIPOUT_DEBUG` | `1`/`true` selects the sandbox |
    /// | `SHIPOUT_TIMEOUT` | Request timeout in seconds (default: 10) |
    /// | `SHIPOUT_ENDPOINT` | Base URL override |
    pub fn from_env() -> Self {
        Self {
            app_key: std::env::var("SHIPOUT_APP_KEY").unwrap_or_default(),
            secret_key: std::env::var("SHIPOUT_SECRET_KEY").unwrap_or_default(),
            authorization: std::env::var("SHIPOUT_AUTHORIZATION").unwrap_or_default(),
            debug: std::env::var("SHIPOUT_DEBUG")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            timeout_secs: std::env::var("SHIPOUT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            endpoint: std::env::var("SHIPOUT_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = app_key.into();
        self
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = secret_key.into();
        self
    }

    pub fn with_authorization(mut self, token: impl Into<String>) -> Self {
        self.authorization = token.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Base URL: the override if set, else sandbox or production by `debug`.
    pub fn base_url(&self) -> &str {
        match &self.endpoint {
            Some(url) => url,
            None if self.debug => SANDBOX_ENDPOINT,
            None => PRODUCTION_ENDPOINT,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that the credentials needed to sign requests are present.
    pub fn validate(&self) -> ShipoutResult<()> {
        let missing: Vec<&str> = [
            ("app_key", &self.app_key),
            ("secret_key", &self.secret_key),
            ("authorization", &self.authorization),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ShipoutError::config(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ShipoutError::config("timeout_secs must be greater than 0"));
        }

        Ok(())
    }
}

/// A request as built by a resource service.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Path relative to the base URL, without a query string.
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
}

impl OutboundRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Add a query parameter, replacing any previous value for `key`.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Attach a JSON body.
    pub fn with_body<B: Serialize>(mut self, body: &B) -> ShipoutResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// The encoded query string (no leading `?`).
    pub fn encoded_query(&self) -> String {
        encode_query(&self.query)
    }

    /// Path plus encoded query, exactly as signed and sent.
    pub fn path_with_query(&self) -> String {
        signing_path(&self.path, &self.encoded_query())
    }
}

/// A response whose envelope validated as successful.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Decode the body again with a resource-specific payload type.
    pub fn decode<T>(&self) -> ShipoutResult<ResponseEnvelope<T>>
    where
        T: DeserializeOwned + Default,
    {
        envelope::decode(&self.body)
    }
}
