//! Base information: warehouses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::SignedClient;
use crate::envelope::lenient;
use crate::error::{ShipoutError, ShipoutResult};
use crate::types::OutboundRequest;

use super::QueryParams;

pub const WAREHOUSE_LIST_PATH: &str = "/open-api/oms/info/warehouse/list";

/// A warehouse available to the account.
///
/// Fields the provider omits, nulls or sends as numbers decode to strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Warehouse {
    /// Owning organization.
    #[serde(deserialize_with = "lenient::string")]
    pub org_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub time_zone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_addr1: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_addr2: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_city: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_contacts: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_country: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_phone: String,
    /// State or province.
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_province: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse_zip_code: String,
}

/// Filters for [`BaseInfoService::warehouses`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehousesQueryParams {
    /// Warehouse name filter.
    #[serde(default)]
    pub name: Option<String>,
}

impl WarehousesQueryParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl QueryParams for WarehousesQueryParams {
    fn validate(&self) -> ShipoutResult<()> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(ShipoutError::validation(
                "name must not be blank when provided",
            )),
            _ => Ok(()),
        }
    }

    fn apply(&self, request: OutboundRequest) -> OutboundRequest {
        match &self.name {
            Some(name) => request.with_query("name", name.as_str()),
            None => request,
        }
    }
}

/// Base information endpoints.
#[derive(Debug, Clone)]
pub struct BaseInfoService {
    client: Arc<SignedClient>,
}

impl BaseInfoService {
    pub fn new(client: Arc<SignedClient>) -> Self {
        Self { client }
    }

    /// List warehouses, optionally filtered by name.
    pub async fn warehouses(
        &self,
        params: &WarehousesQueryParams,
    ) -> ShipoutResult<Vec<Warehouse>> {
        params.validate()?;

        let request = params.apply(OutboundRequest::get(WAREHOUSE_LIST_PATH));
        let items: Vec<Warehouse> = self.client.call(request).await?;

        debug!(count = items.len(), "listed warehouses");
        Ok(items)
    }
}
