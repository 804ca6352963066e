//! Signed client for the OMS open API.
//!
//! Public API: no status code knowledge. All signing and status mapping in http.rs.

use reqwest::header::{HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{Instrument, Span};

use crate::error::{ShipoutError, ShipoutResult};
use crate::signing::RequestSigner;
use crate::types::{OutboundRequest, RawResponse, ShipoutConfig};

mod helpers;
mod http;

use helpers::static_headers;
use http::HttpBackend;

const USER_AGENT_VALUE: &str = concat!("shipout-rs/", env!("CARGO_PKG_VERSION"));

/// Signs every outbound request and validates every response envelope.
///
/// Cheap to clone; clones share the connection pool. Resource services hold
/// one instance behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SignedClient {
    http: HttpBackend,
    span: Span,
}

impl SignedClient {
    pub fn new(config: ShipoutConfig) -> ShipoutResult<Self> {
        config.validate()?;

        let mut default_headers = static_headers(&config.app_key, &config.authorization)?;
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers)
            .build()
            .map_err(|e| ShipoutError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let span = tracing::info_span!("shipout", app_key = %config.app_key, debug = config.debug);

        Ok(Self {
            http: HttpBackend {
                client,
                base_url: config.base_url().trim_end_matches('/').to_string(),
                signer: RequestSigner::new(config.secret_key.as_str()),
                debug: config.debug,
            },
            span,
        })
    }

    pub fn from_env() -> ShipoutResult<Self> {
        Self::new(ShipoutConfig::from_env())
    }

    /// Replace the span every call is recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Send a signed request.
    ///
    /// Returns the raw response only when the envelope says `"OK"`; every
    /// other outcome is an error.
    pub async fn invoke(&self, request: OutboundRequest) -> ShipoutResult<RawResponse> {
        self.http
            .execute(&request)
            .instrument(self.span.clone())
            .await
    }

    /// [`invoke`](Self::invoke) and decode the envelope's `data` as `T`.
    pub async fn call<T>(&self, request: OutboundRequest) -> ShipoutResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.invoke(request).await?;
        Ok(raw.decode::<T>()?.data)
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn is_debug(&self) -> bool {
        self.http.debug
    }
}
