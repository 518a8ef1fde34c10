//! Cross-origin access.
//!
//! The chat widget is served from the documentation site, which usually lives
//! on a different origin than the proxy. Any origin, method and header is
//! accepted.

use tower_http::cors::{Any, CorsLayer};

/// Create the permissive CORS layer.
pub(crate) fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
