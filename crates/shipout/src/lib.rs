//! Signed client for the ShipOut OMS open API.
//!
//! This crate implements the request/response layer of the OMS API:
//!
//! - Per-request signing headers (`timestamp`, `version`, `path`, `sign`)
//! - Static credential headers (`appkey`, bearer `Authorization`)
//! - Response envelope validation with a single error taxonomy
//! - Typed resource services built on one shared client
//!
//! # Quick Start
//!
//! ```no_run
//! use shipout::{OmsClient, WarehousesQueryParams};
//!
//! # async fn example() -> Result<(), shipout::ShipoutError> {
//! // Create client from environment
//! let oms = OmsClient::from_env()?;
//!
//! let params = WarehousesQueryParams::default().with_name("LA");
//! for warehouse in oms.base_info().warehouses(&params).await? {
//!     println!("{} {}", warehouse.warehouse_id, warehouse.warehouse_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every call resolves to exactly one of: a decoded payload, a transport
//! failure, a non-2xx HTTP status, an undecodable body, or a business error
//! carrying the server's error code and message. See [`ShipoutError`].
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `SHIPOUT_APP_KEY` | Application key sent in the `appkey` header |
//! | `SHIPOUT_SECRET_KEY` | Secret used to compute the `sign` header |
//! | `SHIPOUT_AUTHORIZATION` | Bearer token |
//! | `SHIPOUT_DEBUG` | Use the sandbox endpoint and log request/response detail |
//! | `SHIPOUT_TIMEOUT` | Request timeout in seconds (default: 10) |
//! | `SHIPOUT_ENDPOINT` | Override the API base URL |

pub mod client;
pub mod envelope;
pub mod error;
pub mod oms;
pub mod signing;
pub mod types;

// Re-export main types
pub use client::SignedClient;
pub use envelope::{validate, EnvelopeHeader, ResponseEnvelope, ResultStatus, RESULT_OK};
pub use error::{ErrorKind, ShipoutError, ShipoutResult, WrappedError};
pub use oms::{BaseInfoService, OmsClient, QueryParams, Warehouse, WarehousesQueryParams};
pub use signing::{compute, compute_at, RequestSigner, SigningHeaders, SIGN_VERSION};
pub use types::{OutboundRequest, RawResponse, ShipoutConfig, PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT};

pub use reqwest::{Method, StatusCode};
