//! In-process carousel item storage.
//!
//! [`InMemoryCarouselRepository`] keeps items in a `BTreeMap` keyed by
//! id behind a [`tokio::sync::RwLock`]. Reads run concurrently; writes are
//! serialized. Ids come from an atomic counter starting at 1.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CarouselItemRepository;
use crate::domain::{CarouselItem, CarouselItemFields, CarouselItemId};
use crate::error::CarouselError;

/// Volatile repository used when persistence is disabled and in tests.
#[derive(Debug)]
pub struct InMemoryCarouselRepository {
    items: RwLock<BTreeMap<CarouselItemId, CarouselItem>>,
    next_id: AtomicI64,
}

impl InMemoryCarouselRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` if no items are stored.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl Default for InMemoryCarouselRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarouselItemRepository for InMemoryCarouselRepository {
    async fn create(&self, fields: &CarouselItemFields) -> Result<CarouselItem, CarouselError> {
        let id = CarouselItemId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let item = CarouselItem::new(id, fields.clone());
        self.items.write().await.insert(id, item.clone());
        Ok(item)
    }

    async fn get(&self, id: CarouselItemId) -> Result<Option<CarouselItem>, CarouselError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn update(&self, item: &CarouselItem) -> Result<(), CarouselError> {
        let mut map = self.items.write().await;
        let slot = map
            .get_mut(&item.id)
            .ok_or(CarouselError::CarouselItemNotFound(item.id))?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete(&self, item: &CarouselItem) -> Result<(), CarouselError> {
        self.items
            .write()
            .await
            .remove(&item.id)
            .map(|_| ())
            .ok_or(CarouselError::CarouselItemNotFound(item.id))
    }

    async fn get_all(&self) -> Result<Vec<CarouselItem>, CarouselError> {
        Ok(self.items.read().await.values().cloned().collect())
    }
}
