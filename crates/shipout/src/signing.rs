//! Request signing.
//!
//! Every request carries four headers: `timestamp`, `version`, `path` and
//! `sign`. The signature is the uppercase hex MD5 of the other three
//! headers concatenated as `key value` pairs (no separator) in ascending
//! key order, followed by the shared secret:
//!
//! ```text
//! sign = MD5("path" + path + "timestamp" + timestamp + "version" + version + secret)
//! ```
//!
//! The server recomputes the same string, so the key set and ordering are
//! part of the protocol.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;

/// Protocol version sent in the `version` header.
pub const SIGN_VERSION: &str = "1.0.0";

pub const HEADER_TIMESTAMP: &str = "timestamp";
pub const HEADER_VERSION: &str = "version";
pub const HEADER_PATH: &str = "path";
pub const HEADER_SIGN: &str = "sign";

/// Per-request signing headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningHeaders {
    /// Microseconds since the Unix epoch, decimal.
    pub timestamp: String,
    pub version: String,
    /// Request path plus `?query` when the query is non-empty.
    pub path: String,
    /// Uppercase hex MD5 signature.
    pub sign: String,
}

impl SigningHeaders {
    /// Header name/value pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_VERSION, self.version.as_str()),
            (HEADER_PATH, self.path.as_str()),
            (HEADER_SIGN, self.sign.as_str()),
        ]
        .into_iter()
    }
}

/// Signs requests with a shared secret.
#[derive(Clone)]
pub struct RequestSigner {
    secret_key: String,
}

impl RequestSigner {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
        }
    }

    /// Sign `path_with_query` using the current time.
    pub fn sign(&self, path_with_query: &str) -> SigningHeaders {
        compute(&self.secret_key, path_with_query)
    }

    /// Sign `path_with_query` at a fixed timestamp (microseconds).
    pub fn sign_at(&self, path_with_query: &str, timestamp_micros: i64) -> SigningHeaders {
        compute_at(&self.secret_key, path_with_query, timestamp_micros)
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Compute signing headers for `path_with_query` at the current time.
pub fn compute(secret_key: &str, path_with_query: &str) -> SigningHeaders {
    compute_at(secret_key, path_with_query, Utc::now().timestamp_micros())
}

/// Compute signing headers at a fixed timestamp.
pub fn compute_at(
    secret_key: &str,
    path_with_query: &str,
    timestamp_micros: i64,
) -> SigningHeaders {
    let timestamp = timestamp_micros.to_string();
    let canonical = canonical_string(
        [
            (HEADER_TIMESTAMP, timestamp.as_str()),
            (HEADER_VERSION, SIGN_VERSION),
            (HEADER_PATH, path_with_query),
        ],
        secret_key,
    );

    SigningHeaders {
        sign: hex::encode_upper(md5::compute(canonical.as_bytes()).0),
        timestamp,
        version: SIGN_VERSION.to_string(),
        path: path_with_query.to_string(),
    }
}

/// The pre-hash string: `key value` pairs sorted by key, then the secret.
///
/// Input order does not matter. A repeated key keeps its last value.
pub fn canonical_string<'a, I>(fields: I, secret_key: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let sorted: BTreeMap<&str, &str> = fields.into_iter().collect();

    let mut out = String::new();
    for (key, value) in sorted {
        out.push_str(key);
        out.push_str(value);
    }
    out.push_str(secret_key);
    out
}

/// Encode query parameters as `application/x-www-form-urlencoded`.
///
/// Keys come out sorted, so the result is stable for a given parameter set.
pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Path used for signing: `path?query`, or the bare path for an empty query.
pub fn signing_path(path: &str, encoded_query: &str) -> String {
    if encoded_query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, encoded_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/open-api/oms/info/warehouse/list";
    const TS: i64 = 1_700_000_000_000_000;

    #[test]
    fn test_known_signature_with_query() {
        let headers = compute_at("test-secret", &format!("{PATH}?name=ABC"), TS);

        assert_eq!(headers.timestamp, "1700000000000000");
        assert_eq!(headers.version, "1.0.0");
        assert_eq!(headers.path, "/open-api/oms/info/warehouse/list?name=ABC");
        assert_eq!(headers.sign, "A3260878665947D631B412DA3731B351");
    }

    #[test]
    fn test_known_signature_bare_path() {
        let headers = compute_at("test-secret", PATH, TS);
        assert_eq!(headers.sign, "0B8F066AB6F2E42613A3F4EDC1C452E6");
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = compute_at("s3cr3t", PATH, TS);
        let b = compute_at("s3cr3t", PATH, TS);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_inputs() {
        let base = compute_at("s3cr3t", PATH, TS);
        assert_ne!(base.sign, compute_at("other", PATH, TS).sign);
        assert_ne!(base.sign, compute_at("s3cr3t", PATH, TS + 1).sign);
        assert_ne!(base.sign, compute_at("s3cr3t", "/other", TS).sign);
    }

    #[test]
    fn test_signature_is_uppercase_hex() {
        let headers = compute("s3cr3t", PATH);
        assert_eq!(headers.sign.len(), 32);
        assert!(headers
            .sign
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_timestamp_is_microseconds() {
        let before = Utc::now().timestamp_micros();
        let headers = compute("s3cr3t", PATH);
        let after = Utc::now().timestamp_micros();

        let ts: i64 = headers.timestamp.parse().expect("numeric timestamp");
        assert!(ts >= before && ts <= after);
        assert_eq!(headers.timestamp.len(), 16);
    }

    #[test]
    fn test_canonical_string_sorts_keys() {
        let forward = canonical_string(
            [("timestamp", "1"), ("version", "1.0.0"), ("path", "/p")],
            "secret",
        );
        let reversed = canonical_string(
            [("path", "/p"), ("version", "1.0.0"), ("timestamp", "1")],
            "secret",
        );

        assert_eq!(forward, "path/ptimestamp1version1.0.0secret");
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_signing_path() {
        assert_eq!(signing_path(PATH, "name=ABC"), format!("{PATH}?name=ABC"));
        assert_eq!(signing_path(PATH, ""), PATH);
    }

    #[test]
    fn test_encode_query() {
        let mut params = BTreeMap::new();
        assert_eq!(encode_query(&params), "");

        params.insert("name".to_string(), "ABC".to_string());
        assert_eq!(encode_query(&params), "name=ABC");

        params.insert("city".to_string(), "Los Angeles & Co".to_string());
        assert_eq!(encode_query(&params), "city=Los+Angeles+%26+Co&name=ABC");
    }

    #[test]
    fn test_headers_iter() {
        let headers = compute_at("s", PATH, TS);
        let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["timestamp", "version", "path", "sign"]);
    }

    #[test]
    fn test_signer_debug_redacts_secret() {
        let signer = RequestSigner::new("super-secret");
        let rendered = format!("{:?}", signer);
        assert!(!rendered.contains("super-secret"));
        assert_eq!(signer.sign_at(PATH, TS), compute_at("super-secret", PATH, TS));
    }
}
