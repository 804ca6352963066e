//! OMS resource services.
//!
//! Each service holds the same [`SignedClient`] behind an `Arc`, builds its
//! query parameters, validates them locally and maps the envelope payload
//! into typed records.

use std::sync::Arc;

use crate::client::SignedClient;
use crate::error::ShipoutResult;
use crate::types::{OutboundRequest, ShipoutConfig};

pub mod base_info;

pub use base_info::{BaseInfoService, Warehouse, WarehousesQueryParams};

/// Request parameters of a resource call.
pub trait QueryParams {
    /// Local precondition checks. Runs before any network call.
    fn validate(&self) -> ShipoutResult<()>;

    /// Add these parameters to `request`.
    fn apply(&self, request: OutboundRequest) -> OutboundRequest;
}

/// Entry point to all OMS services.
#[derive(Debug, Clone)]
pub struct OmsClient {
    client: Arc<SignedClient>,
    base_info: BaseInfoService,
}

impl OmsClient {
    pub fn new(config: ShipoutConfig) -> ShipoutResult<Self> {
        Ok(Self::with_client(Arc::new(SignedClient::new(config)?)))
    }

    pub fn from_env() -> ShipoutResult<Self> {
        Self::new(ShipoutConfig::from_env())
    }

    /// Build services over an existing client.
    pub fn with_client(client: Arc<SignedClient>) -> Self {
        Self {
            base_info: BaseInfoService::new(Arc::clone(&client)),
            client,
        }
    }

    /// The shared signed client (for calls no service covers yet).
    pub fn client(&self) -> &Arc<SignedClient> {
        &self.client
    }

    pub fn base_info(&self) -> &BaseInfoService {
        &self.base_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_share_one_client() {
        let config = ShipoutConfig::default()
            .with_app_key("app")
            .with_secret_key("secret")
            .with_authorization("token");
        let oms = OmsClient::new(config).expect("client");

        assert_eq!(Arc::strong_count(oms.client()), 2);
    }
}
