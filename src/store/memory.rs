use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{LocationStore, MovementStore};
use crate::error::StoreError;
use crate::models::{
    location::Location,
    movement::{FieldUpdate, Movement},
};

/// Movements kept in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryMovementStore {
    items: RwLock<HashMap<String, Movement>>,
}

impl MemoryMovementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovementStore for MemoryMovementStore {
    async fn scan(&self) -> Result<Vec<Movement>, StoreError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Movement>, StoreError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn put(&self, movement: &Movement) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .insert(movement.id.clone(), movement.clone());
        Ok(())
    }

    async fn update(&self, id: &str, updates: &[FieldUpdate]) -> Result<Movement, StoreError> {
        let mut items = self.items.write().await;
        let movement = items.entry(id.to_string()).or_insert_with(|| Movement {
            id: id.to_string(),
            ..Default::default()
        });

        for update in updates {
            movement.apply(update.clone());
        }

        Ok(movement.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.items.write().await.remove(id);
        Ok(())
    }
}

/// Location pings kept in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    items: RwLock<HashMap<String, Location>>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn scan(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn put(&self, location: &Location) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .insert(location.id.clone(), location.clone());
        Ok(())
    }
}
