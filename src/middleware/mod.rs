//! HTTP middleware components.
//!
//! Middleware wrap every route of a handler's router and can
//! decorate the response on its way out.

/// Cross-origin response headers
pub mod cors;
