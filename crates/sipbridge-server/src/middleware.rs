use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use sipbridge_core::ProviderConfig;
use uuid::Uuid;

use crate::api::ApiError;

pub const PROVIDER_KEY_HEADER: &str = "x-provider-key";
pub const PROVIDER_URL_HEADER: &str = "x-provider-url";
pub const PROVIDER_LOCALE_HEADER: &str = "x-provider-locale";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// An incoming `x-request-id` header is reused; otherwise a new `UUIDv4` is
/// generated. The ID is stored as a [`RequestId`] extension and echoed on the
/// response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    res
}

/// Provider configuration sent by the bridge host in request headers.
///
/// `x-provider-key` is required; `x-provider-url` and `x-provider-locale` are
/// optional.
#[derive(Debug, Clone)]
pub struct ProviderHeaders(pub ProviderConfig);

impl<S: Send + Sync> FromRequestParts<S> for ProviderHeaders {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .extensions
            .get::<RequestId>()
            .map(|r| r.0.clone())
            .unwrap_or_default();

        provider_config_from_headers(&parts.headers).map(Self).ok_or_else(|| {
            ApiError::with_status(
                request_id,
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                format!("missing {PROVIDER_KEY_HEADER} header"),
            )
        })
    }
}

fn provider_config_from_headers(headers: &HeaderMap) -> Option<ProviderConfig> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };

    let api_key = header(PROVIDER_KEY_HEADER)?;
    Some(ProviderConfig {
        api_key,
        api_url: header(PROVIDER_URL_HEADER),
        locale: header(PROVIDER_LOCALE_HEADER),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_config_reads_all_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(PROVIDER_KEY_HEADER, HeaderValue::from_static("id:token"));
        headers.insert(
            PROVIDER_URL_HEADER,
            HeaderValue::from_static("https://app.sipgate.com"),
        );
        headers.insert(PROVIDER_LOCALE_HEADER, HeaderValue::from_static("de_DE"));

        let config = provider_config_from_headers(&headers).expect("config");
        assert_eq!(config.api_key, "id:token");
        assert_eq!(config.api_url.as_deref(), Some("https://app.sipgate.com"));
        assert_eq!(config.locale.as_deref(), Some("de_DE"));
    }

    #[test]
    fn provider_config_requires_key() {
        let mut headers = HeaderMap::new();
        headers.insert(PROVIDER_URL_HEADER, HeaderValue::from_static("https://x"));
        assert!(provider_config_from_headers(&headers).is_none());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(PROVIDER_KEY_HEADER, HeaderValue::from_static("   "));
        assert!(provider_config_from_headers(&headers).is_none());
    }
}
