//! Shared HTTP client and status-code mapping.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};

use crate::error::AssistantError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Get (or create) the shared reqwest client.
///
/// Both the model endpoint and the price APIs go through this client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-200 HTTP status to an error.
///
/// `retry_after_ms` comes from the `Retry-After` header; without it, a 429
/// falls back to `error.retry_after` (seconds) in the JSON body.
pub fn status_to_error(status: u16, body: &str, retry_after_ms: Option<u64>) -> AssistantError {
    match status {
        401 | 403 => AssistantError::Authentication(body.to_string()),
        429 => AssistantError::RateLimited {
            retry_after_ms: retry_after_ms.or_else(|| retry_after_from_body(body)),
        },
        _ => AssistantError::api(status, body),
    }
}

/// Parse a `Retry-After` header given in delta-seconds.
pub fn retry_after_header(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| *s >= 0.0)
        .map(|s| (s * 1000.0) as u64)
}

fn retry_after_from_body(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_headers_carry_key() {
        let headers = bearer_headers("secret");
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            status_to_error(401, "bad key", None),
            AssistantError::Authentication(_)
        ));
        assert!(matches!(
            status_to_error(429, r#"{"error":{"retry_after":1.5}}"#, None),
            AssistantError::RateLimited {
                retry_after_ms: Some(1500)
            }
        ));
        assert!(matches!(
            status_to_error(429, r#"{"error":{"retry_after":1.5}}"#, Some(7000)),
            AssistantError::RateLimited {
                retry_after_ms: Some(7000)
            }
        ));
        assert!(matches!(
            status_to_error(500, "oops", None),
            AssistantError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn retry_after_header_is_read_in_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after_header(&headers), None);
        headers.insert(RETRY_AFTER, HeaderValue::from_static("12"));
        assert_eq!(retry_after_header(&headers), Some(12_000));
        headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"));
        assert_eq!(retry_after_header(&headers), None);
    }
}
