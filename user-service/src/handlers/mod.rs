//! HTTP handlers for user-service.

pub mod health;
pub mod pages;
pub mod users;

use axum::{
    extract::OriginalUri,
    http::{header::HOST, HeaderMap, StatusCode, Uri},
    response::Response,
};
use service_core::error::ErrorBody;

/// Absolute URL of the request as the client addressed it, for error messages.
pub fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    if uri.scheme().is_some() {
        return uri.to_string();
    }

    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    match headers.get(HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path.to_string(),
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(OriginalUri(uri): OriginalUri, headers: HeaderMap) -> Response {
    let url = request_url(&headers, &uri);
    tracing::debug!(url = %url, "No route matched");
    ErrorBody::new(StatusCode::NOT_FOUND, format!("Not Found: {}", url))
        .into_response_with(StatusCode::NOT_FOUND)
}
