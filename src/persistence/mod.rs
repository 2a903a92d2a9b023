//! Persistence layer: storage for carousel items.
//!
//! Provides the [`CarouselItemRepository`] trait plus two implementations:
//! an in-process [`InMemoryCarouselRepository`] and a PostgreSQL-backed
//! [`PostgresCarouselRepository`] using `sqlx::PgPool`.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

pub use memory::InMemoryCarouselRepository;
pub use postgres::PostgresCarouselRepository;

use crate::domain::{CarouselItem, CarouselItemFields, CarouselItemId};
use crate::error::CarouselError;

/// Generic create/read/update/delete/list storage for carousel items.
///
/// Implementations return items from [`get_all`](Self::get_all) in
/// ascending id order.
#[async_trait]
pub trait CarouselItemRepository: Send + Sync + fmt::Debug {
    /// Persists a new item and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::PersistenceError`] on storage failure.
    async fn create(&self, fields: &CarouselItemFields) -> Result<CarouselItem, CarouselError>;

    /// Looks an item up by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::PersistenceError`] on storage failure.
    async fn get(&self, id: CarouselItemId) -> Result<Option<CarouselItem>, CarouselError>;

    /// Overwrites every field of an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::CarouselItemNotFound`] if the row no longer
    /// exists, or [`CarouselError::PersistenceError`] on storage failure.
    async fn update(&self, item: &CarouselItem) -> Result<(), CarouselError>;

    /// Permanently removes an item.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::CarouselItemNotFound`] if the row no longer
    /// exists, or [`CarouselError::PersistenceError`] on storage failure.
    async fn delete(&self, item: &CarouselItem) -> Result<(), CarouselError>;

    /// Returns every stored item.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::PersistenceError`] on storage failure.
    async fn get_all(&self) -> Result<Vec<CarouselItem>, CarouselError>;
}
