//! Permissive cross-origin headers.
//!
//! Browser clients call both handlers directly, so every response (errors
//! and preflights included) carries the same fixed set of CORS headers.
//! The header set differs per handler only in the methods and request
//! headers it advertises.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
    },
    middleware::Next,
    response::Response,
};

/// Header values stamped onto every response of one handler.
#[derive(Debug, Clone, Copy)]
pub struct CorsPolicy {
    pub allow_headers: &'static str,
    pub allow_methods: &'static str,
}

/// Policy of the movement handler.
pub const MOVEMENTS: CorsPolicy = CorsPolicy {
    allow_headers: "Content-Type,Authorization",
    allow_methods: "GET,POST,PUT,DELETE,OPTIONS",
};

/// Policy of the location handler.
pub const LOCATIONS: CorsPolicy = CorsPolicy {
    allow_headers: "Content-Type",
    allow_methods: "GET,POST,OPTIONS",
};

impl CorsPolicy {
    /// Overwrite the content type and CORS headers in `headers`.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(self.allow_headers),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(self.allow_methods),
        );
    }
}

/// CORS middleware function.
///
/// Runs the handler first and decorates whatever it returned, so the
/// headers are present on 4xx and 5xx responses too.
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    policy.apply(response.headers_mut());
    response
}
