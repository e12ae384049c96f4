use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Builds the CORS policy from a list of allowed origins.
///
/// An empty list or a `*` entry allows any origin. Unparseable origins are
/// logged and skipped.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|o| match o.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    layer.allow_origin(origins)
}
