//! Data models for the two stored tables and their request/response bodies.

use serde::Serialize;

/// JSON encoders for exact-decimal fields
pub mod decimal;
/// Geolocation ping model
pub mod location;
/// Financial movement model
pub mod movement;

/// Body of responses that only carry a message.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
