//! Key-value table access for movements and locations.
//!
//! Handlers only see these traits; the concrete backend is picked once at
//! start-up and injected into each router as shared state.
//!
//! Every operation touches a single item (or reads the whole table) and is
//! atomic on its own. There are no multi-item transactions and no version
//! checks: concurrent writes to the same id are last-writer-wins.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    location::Location,
    movement::{FieldUpdate, Movement},
};

/// In-process tables
pub mod memory;
/// PostgreSQL tables
pub mod postgres;

/// Movement store handle shared by every request.
pub type SharedMovementStore = Arc<dyn MovementStore>;

/// Location store handle shared by every request.
pub type SharedLocationStore = Arc<dyn LocationStore>;

/// The `movements` table.
#[async_trait]
pub trait MovementStore: Send + Sync {
    /// Every stored movement, in no particular order.
    async fn scan(&self) -> Result<Vec<Movement>, StoreError>;

    /// Read one item; `None` when the id is not stored.
    async fn get(&self, id: &str) -> Result<Option<Movement>, StoreError>;

    /// Write the item, fully replacing any item with the same id.
    async fn put(&self, movement: &Movement) -> Result<(), StoreError>;

    /// Write only the listed columns of `id` and return the whole item.
    ///
    /// Columns that are not listed keep their stored value. An unknown id is
    /// created holding just the listed columns.
    async fn update(&self, id: &str, updates: &[FieldUpdate]) -> Result<Movement, StoreError>;

    /// Remove the item; removing an absent id succeeds.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// The `locations` table.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn scan(&self) -> Result<Vec<Location>, StoreError>;

    async fn put(&self, location: &Location) -> Result<(), StoreError>;
}
