//! Movement data models and API request/response types.
//!
//! This module defines:
//! - `Movement`: Stored item of the `movements` table
//! - `NewMovement`: Request body for creating movements
//! - `MovementPatch` / `FieldUpdate`: Request body for partial updates and the
//!   column writes it turns into
//! - Response envelopes returned to clients

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::decimal;

/// A single income or expense entry.
///
/// # Database Table
///
/// Maps to the `movements` table, keyed by `id`. Every other attribute is
/// optional and opaque to the service.
///
/// # Amount Storage
///
/// `valor` is an exact decimal (`NUMERIC` in PostgreSQL). In responses it is
/// written as a JSON integer when it has no fractional part:
/// - `100` is returned as `100`, not `100.0`
/// - `100.50` is returned as `100.5`
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, Serialize)]
pub struct Movement {
    /// Primary key, caller-supplied or a generated UUID
    pub id: String,

    /// Date or label of the movement
    pub data: Option<String>,

    pub categoria: Option<String>,

    pub nome: Option<String>,

    /// Currency code, e.g. "BRL"
    pub moeda: Option<String>,

    #[serde(serialize_with = "decimal::integral_or_float")]
    pub valor: Option<Decimal>,

    pub observacao: Option<String>,

    /// Reminder flag, `false` unless the creator sent something else
    pub lembrar_proxima_compra: Option<bool>,
}

impl Movement {
    /// Apply a single column write.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Data(value) => self.data = value,
            FieldUpdate::Categoria(value) => self.categoria = value,
            FieldUpdate::Nome(value) => self.nome = value,
            FieldUpdate::Moeda(value) => self.moeda = value,
            FieldUpdate::Valor(value) => self.valor = value,
            FieldUpdate::Observacao(value) => self.observacao = value,
            FieldUpdate::LembrarProximaCompra(value) => self.lembrar_proxima_compra = value,
        }
    }
}

/// Request body for creating a movement.
///
/// # JSON Example
///
/// ```json
/// {
///   "data": "2025-03-10",
///   "categoria": "mercado",
///   "nome": "Feira",
///   "moeda": "BRL",
///   "valor": 87.4,
///   "observacao": "semana",
///   "lembrar_proxima_compra": true
/// }
/// ```
///
/// `valor` may be a JSON number or a numeric string; either way it is parsed
/// from its decimal text, so `87.4` is stored as exactly `87.4`.
#[derive(Debug, Default, Deserialize)]
pub struct NewMovement {
    /// Optional caller-chosen key; empty or missing means "generate one"
    pub id: Option<String>,
    pub data: Option<String>,
    pub categoria: Option<String>,
    pub nome: Option<String>,
    pub moeda: Option<String>,
    pub valor: Option<Decimal>,
    pub observacao: Option<String>,

    /// Defaults to `false` when the key is missing; an explicit `null` is kept
    #[serde(default = "default_reminder")]
    pub lembrar_proxima_compra: Option<bool>,
}

fn default_reminder() -> Option<bool> {
    Some(false)
}

impl NewMovement {
    /// Build the item that will be written, generating an id when needed.
    pub fn into_movement(self) -> Movement {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Movement {
            id,
            data: self.data,
            categoria: self.categoria,
            nome: self.nome,
            moeda: self.moeda,
            valor: self.valor,
            observacao: self.observacao,
            lembrar_proxima_compra: self.lembrar_proxima_compra,
        }
    }
}

/// Request body for a partial update.
///
/// Each field is `None` when the key was left out of the body and
/// `Some(None)` when it was sent as `null`. Only keys that were sent are
/// written; everything else in the stored item is left alone.
///
/// Keys that are not movement attributes (including `id`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct MovementPatch {
    #[serde(default, deserialize_with = "present")]
    pub data: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub categoria: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub nome: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub moeda: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub valor: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    pub observacao: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub lembrar_proxima_compra: Option<Option<bool>>,
}

/// Marks a key as present, whatever its value (`null` included).
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl MovementPatch {
    /// The column writes this patch asks for, in column order.
    pub fn into_updates(self) -> Vec<FieldUpdate> {
        [
            self.data.map(FieldUpdate::Data),
            self.categoria.map(FieldUpdate::Categoria),
            self.nome.map(FieldUpdate::Nome),
            self.moeda.map(FieldUpdate::Moeda),
            self.valor.map(FieldUpdate::Valor),
            self.observacao.map(FieldUpdate::Observacao),
            self.lembrar_proxima_compra
                .map(FieldUpdate::LembrarProximaCompra),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// One column write of a partial update.
///
/// The set of columns is closed, so storage backends can address each one
/// by a fixed identifier and bind the value as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Data(Option<String>),
    Categoria(Option<String>),
    Nome(Option<String>),
    Moeda(Option<String>),
    Valor(Option<Decimal>),
    Observacao(Option<String>),
    LembrarProximaCompra(Option<bool>),
}

impl FieldUpdate {
    /// Column (and JSON attribute) name written by this update.
    pub fn column(&self) -> &'static str {
        match self {
            FieldUpdate::Data(_) => "data",
            FieldUpdate::Categoria(_) => "categoria",
            FieldUpdate::Nome(_) => "nome",
            FieldUpdate::Moeda(_) => "moeda",
            FieldUpdate::Valor(_) => "valor",
            FieldUpdate::Observacao(_) => "observacao",
            FieldUpdate::LembrarProximaCompra(_) => "lembrar_proxima_compra",
        }
    }
}

/// Response body for `GET /movements`.
#[derive(Debug, Serialize)]
pub struct MovementList {
    pub movements: Vec<Movement>,
}

/// Response body for create and update.
///
/// ```json
/// {
///   "message": "movement created",
///   "movement": { "id": "...", "valor": 100, "...": "..." }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct MovementEnvelope {
    pub message: &'static str,
    pub movement: Movement,
}
