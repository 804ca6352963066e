//! HTTP layer: signing before send, envelope validation after receive.
//!
//! This is the ONLY place that touches status codes and wire headers.
//! client/mod.rs never interprets a response.

use tracing::{debug, warn};

use crate::envelope;
use crate::error::{ShipoutError, ShipoutResult};
use crate::signing::RequestSigner;
use crate::types::{OutboundRequest, RawResponse};

use super::helpers::join_url;

/// HTTP backend (holds reqwest client, signer, base URL).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) signer: RequestSigner,
    pub(crate) debug: bool,
}

impl HttpBackend {
    /// Send one signed request and validate the response envelope.
    ///
    /// No retries: a failed attempt is final.
    pub(crate) async fn execute(&self, request: &OutboundRequest) -> ShipoutResult<RawResponse> {
        let path = request.path_with_query();
        let signing = self.signer.sign(&path);
        let url = join_url(&self.base_url, &path);

        if self.debug {
            debug!(
                method = %request.method,
                url = %url,
                timestamp = %signing.timestamp,
                sign = %signing.sign,
                body = ?request.body,
                "sending signed request"
            );
        }

        let mut builder = self.client.request(request.method.clone(), &url);
        for (name, value) in signing.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, path = %path, "request failed before a response arrived");
            ShipoutError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ShipoutError::Network {
            message: format!("failed to read response body: {}", e),
        })?;

        if self.debug {
            debug!(status = status.as_u16(), body = %body, "received response");
        }

        match envelope::validate(status, &body) {
            Ok(_) => Ok(RawResponse { status, body }),
            Err(e) => {
                warn!(error = %e, path = %path, status = status.as_u16(), "request rejected");
                Err(e)
            }
        }
    }
}
