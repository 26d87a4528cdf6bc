//! Location ping HTTP handlers.
//!
//! - GET /locations - List every ping as a bare JSON array
//! - POST /locations - Record a ping
//!
//! Pings cannot be updated or deleted.

use axum::{Json, body::Bytes, extract::State};
use chrono::Utc;
use serde_json::Value;

use super::{decode_body, from_object};
use crate::{
    error::LocationError,
    models::{
        Message,
        location::{Location, NewLocation},
    },
    store::SharedLocationStore,
};

/// List all pings.
///
/// # Response (200 OK)
///
/// ```json
/// [
///   {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "timestamp": "2025-03-10T14:30:00.000000Z",
///     "latitude": -23.5,
///     "longitude": -46.6,
///     "info": "home"
///   }
/// ]
/// ```
pub async fn list_locations(
    State(store): State<SharedLocationStore>,
) -> Result<Json<Vec<Location>>, LocationError> {
    let locations = store.scan().await?;
    tracing::debug!(count = locations.len(), "locations scanned");

    Ok(Json(locations))
}

/// Record a ping.
///
/// # Request Body
///
/// `{"latitude"?, "longitude"?, "info"?}`, either as a JSON object or as a
/// JSON string holding that object. The server assigns `id` and `timestamp`.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "data received"}`
/// - **Error (500)**: `{"error": "<details>"}`
pub async fn create_location(
    State(store): State<SharedLocationStore>,
    body: Bytes,
) -> Result<Json<Message>, LocationError> {
    let value = match decode_body(&body)? {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    let request: NewLocation = from_object(value)?;
    let location = request.into_location(Utc::now());

    store.put(&location).await?;
    tracing::info!(location_id = %location.id, "location recorded");

    Ok(Json(Message {
        message: "data received",
    }))
}

/// Any method the location route does not serve.
pub async fn method_not_allowed() -> LocationError {
    LocationError::MethodNotAllowed
}
