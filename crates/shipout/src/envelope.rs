//! Response envelope decoding and validation.
//!
//! Every OMS response is wrapped in the same JSON envelope:
//!
//! ```json
//! {"result": "OK", "errorCode": "", "message": "", "zhMessage": "", "errorType": "", "data": [...]}
//! ```
//!
//! `result == "OK"` is the only success signal. An HTTP 200 with any other
//! result is a business failure.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ShipoutError, ShipoutResult, WrappedError};

/// Wire value of a successful `result`.
pub const RESULT_OK: &str = "OK";

/// Decoded `result` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultStatus {
    Ok,
    /// Anything other than `"OK"`, including a missing field.
    Failed(String),
}

impl Default for ResultStatus {
    fn default() -> Self {
        Self::Failed(String::new())
    }
}

impl From<String> for ResultStatus {
    fn from(value: String) -> Self {
        if value == RESULT_OK {
            Self::Ok
        } else {
            Self::Failed(value)
        }
    }
}

impl<'de> Deserialize<'de> for ResultStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::string(deserializer).map(Self::from)
    }
}

/// Status fields of the envelope, without the payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "WireHeader")]
pub struct EnvelopeHeader {
    pub result: ResultStatus,

    /// `errorCode`, or `ErrorCode` when the former is blank.
    pub error_code: String,

    /// Default-locale message.
    pub message: String,

    /// Chinese message; preferred over `message` when non-blank.
    pub zh_message: String,

    pub error_type: String,
}

/// Header as sent. Both code spellings may appear in one body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireHeader {
    #[serde(default)]
    result: ResultStatus,

    #[serde(default, deserialize_with = "lenient::string")]
    error_code: String,

    #[serde(default, rename = "ErrorCode", deserialize_with = "lenient::string")]
    legacy_error_code: String,

    #[serde(default, deserialize_with = "lenient::string")]
    message: String,

    #[serde(default, deserialize_with = "lenient::string")]
    zh_message: String,

    #[serde(default, deserialize_with = "lenient::string")]
    error_type: String,
}

impl From<WireHeader> for EnvelopeHeader {
    fn from(wire: WireHeader) -> Self {
        let error_code = if wire.error_code.trim().is_empty() {
            wire.legacy_error_code
        } else {
            wire.error_code
        };

        Self {
            result: wire.result,
            error_code,
            message: wire.message,
            zh_message: wire.zh_message,
            error_type: wire.error_type,
        }
    }
}

impl EnvelopeHeader {
    pub fn is_success(&self) -> bool {
        self.result == ResultStatus::Ok
    }

    /// The business error carried by a failed envelope.
    pub fn error(&self) -> Option<WrappedError> {
        match self.result {
            ResultStatus::Ok => None,
            ResultStatus::Failed(_) => Some(WrappedError::new(
                self.error_code.as_str(),
                [self.zh_message.as_str(), self.message.as_str()],
            )),
        }
    }

    /// `Ok(())` for a successful envelope, the business error otherwise.
    pub fn check(&self) -> Result<(), WrappedError> {
        match self.error() {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}

/// Full envelope with a typed payload.
///
/// The default payload is the generic array of opaque JSON values; resource
/// calls decode the same body again with their own record type.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ResponseEnvelope<T = Vec<Value>> {
    #[serde(flatten)]
    pub header: EnvelopeHeader,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub data: T,
}

impl<T> ResponseEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.header.is_success()
    }

    /// The payload of a successful envelope, the business error otherwise.
    pub fn into_data(self) -> Result<T, WrappedError> {
        self.header.check()?;
        Ok(self.data)
    }
}

/// Classify a raw response.
///
/// Non-2xx statuses are returned as [`ShipoutError::Http`] without touching
/// the body, so gateway error pages never reach the JSON decoder. Decode
/// errors are returned unwrapped. A decoded envelope whose `result` is not
/// `"OK"` becomes [`ShipoutError::Business`].
pub fn validate(status: StatusCode, body: &str) -> ShipoutResult<EnvelopeHeader> {
    if !status.is_success() {
        return Err(ShipoutError::Http {
            status,
            body: body.to_string(),
        });
    }

    let header: EnvelopeHeader = serde_json::from_str(body)?;
    header.check()?;
    Ok(header)
}

/// Decode a body into an envelope with payload type `T`.
pub fn decode<T>(body: &str) -> ShipoutResult<ResponseEnvelope<T>>
where
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_str(body)?)
}

/// Field decoders that accept the loose typing the OMS sometimes sends.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// String field that may arrive as null, a number or a bool.
    pub(crate) fn string<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected string, got: {other}"
            ))),
        }
    }

    /// Null decodes to the type's default.
    pub(crate) fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }
}
