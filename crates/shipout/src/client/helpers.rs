//! Pure helpers: URL joining and header construction (no HTTP, no status logic).

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{ShipoutError, ShipoutResult};

/// Header carrying the application key.
pub(crate) const APP_KEY_HEADER: &str = "appkey";

/// Join a base URL and a path that may or may not start with `/`.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Static headers sent with every request.
pub(crate) fn static_headers(app_key: &str, token: &str) -> ShipoutResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let app_key = HeaderValue::from_str(app_key)
        .map_err(|e| ShipoutError::config(format!("app_key is not a valid header value: {}", e)))?;
    headers.insert(HeaderName::from_static(APP_KEY_HEADER), app_key);

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
        ShipoutError::config(format!("authorization is not a valid header value: {}", e))
    })?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    Ok(headers)
}
