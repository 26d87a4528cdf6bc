//! Movement HTTP handlers.
//!
//! This module implements the movement endpoints:
//! - GET /movements - List every movement
//! - POST /movements - Create (or overwrite) a movement
//! - PUT /movements/{movement_id} - Partially update a movement
//! - DELETE /movements/{movement_id} - Delete a movement
//!
//! `GET` and `POST` are also accepted on `/movements/{movement_id}`; the path
//! parameter is ignored there.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use super::{decode_body, from_object};
use crate::{
    error::MovementError,
    models::{
        Message,
        movement::{MovementEnvelope, MovementList, MovementPatch, NewMovement},
    },
    store::SharedMovementStore,
};

/// List all movements.
///
/// # Response
///
/// - **Success (200 OK)**: every stored item, unordered
/// - **Error (500)**: store failure
///
/// ```json
/// {
///   "movements": [
///     { "id": "550e8400-e29b-41d4-a716-446655440000", "nome": "Feira", "valor": 87.4, "...": "..." }
///   ]
/// }
/// ```
pub async fn list_movements(
    State(store): State<SharedMovementStore>,
) -> Result<Json<MovementList>, MovementError> {
    let movements = store.scan().await?;
    tracing::debug!(count = movements.len(), "movements scanned");

    Ok(Json(MovementList { movements }))
}

/// Create a movement.
///
/// # Request Body
///
/// Any subset of the movement attributes. `id` is generated when missing or
/// empty; a body-supplied `id` that already exists is overwritten entirely.
/// An empty body creates a movement with only an id and the reminder flag.
///
/// # Response
///
/// - **Success (201 Created)**: `{"message": "movement created", "movement": {...}}`
/// - **Error (500)**: store failure or malformed body
pub async fn create_movement(
    State(store): State<SharedMovementStore>,
    body: Bytes,
) -> Result<impl IntoResponse, MovementError> {
    let request: NewMovement = from_object(decode_body(&body)?)?;
    let movement = request.into_movement();

    store.put(&movement).await?;
    tracing::info!(movement_id = %movement.id, "movement created");

    Ok((
        StatusCode::CREATED,
        Json(MovementEnvelope {
            message: "movement created",
            movement,
        }),
    ))
}

/// Partially update a movement.
///
/// # Request Body
///
/// Only the attributes to change. Keys that are left out keep their stored
/// value; keys sent as `null` are cleared.
///
/// ```json
/// { "nome": "Aluguel", "valor": 1500 }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "movement updated", "movement": {...}}`
///   with the full item as stored after the write
/// - **Error (400)**: body is empty (blank, `null`, `{}`, `[]`, `""`, `0` or
///   `false`); checked before the store is touched
/// - **Error (500)**: store failure or malformed body
///
/// Keys that are not movement attributes are ignored. A body made only of
/// such keys writes nothing and answers with the stored item (created with
/// just its id when it did not exist).
pub async fn update_movement(
    State(store): State<SharedMovementStore>,
    Path(movement_id): Path<String>,
    body: Bytes,
) -> Result<Json<MovementEnvelope>, MovementError> {
    let value = decode_body(&body)?;
    if is_empty(&value) {
        return Err(MovementError::NothingToUpdate);
    }

    let patch: MovementPatch = from_object(value)?;
    let updates = patch.into_updates();

    // Only unknown keys: nothing to write, answer with the item as stored
    let stored = if updates.is_empty() {
        store.get(&movement_id).await?
    } else {
        None
    };
    let movement = match stored {
        Some(movement) => movement,
        None => store.update(&movement_id, &updates).await?,
    };
    tracing::info!(
        movement_id = %movement.id,
        fields = updates.len(),
        "movement updated"
    );

    Ok(Json(MovementEnvelope {
        message: "movement updated",
        movement,
    }))
}

/// Delete a movement.
///
/// Deleting an id that does not exist still answers 200.
pub async fn delete_movement(
    State(store): State<SharedMovementStore>,
    Path(movement_id): Path<String>,
) -> Result<Json<Message>, MovementError> {
    store.delete(&movement_id).await?;
    tracing::info!(movement_id = %movement_id, "movement deleted");

    Ok(Json(Message {
        message: "movement deleted",
    }))
}

/// Any method the movement routes do not serve.
pub async fn method_not_supported() -> MovementError {
    MovementError::MethodNotSupported
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
