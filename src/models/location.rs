//! Location ping models.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::decimal;

/// A geolocation ping stored in the `locations` table.
///
/// Pings are append-only: they are created and listed, never changed.
/// Optional attributes that were not supplied are left out of the JSON
/// entirely rather than written as `null`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Location {
    /// Server-generated UUID
    pub id: String,

    /// ISO-8601 UTC instant of creation
    pub timestamp: String,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "decimal::float"
    )]
    pub latitude: Option<Decimal>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "decimal::float"
    )]
    pub longitude: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Request body for `POST /locations`.
///
/// ```json
/// { "latitude": -23.5, "longitude": -46.6, "info": "home" }
/// ```
///
/// Any `id` or `timestamp` sent by the caller is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct NewLocation {
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub info: Option<String>,
}

impl NewLocation {
    /// Stamp the ping with a fresh id and the given creation time.
    ///
    /// An empty `info` is treated as absent.
    pub fn into_location(self, now: DateTime<Utc>) -> Location {
        Location {
            id: Uuid::new_v4().to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            latitude: self.latitude,
            longitude: self.longitude,
            info: self.info.filter(|info| !info.is_empty()),
        }
    }
}
