//! Cross-origin policy for browser front ends.
use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin may read state and drive runs; only JSON bodies are accepted.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
