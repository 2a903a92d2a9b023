//! PostgreSQL implementation of the carousel item repository.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::CarouselItemRepository;
use super::models::CarouselItemRow;
use crate::config::ServiceConfig;
use crate::domain::{CarouselItem, CarouselItemFields, CarouselItemId};
use crate::error::CarouselError;

const SELECT_COLUMNS: &str = "carousel_item_id, title, excerpt, image_url, link, button_title, \
                              expiration_date, status";

/// PostgreSQL-backed repository using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresCarouselRepository {
    pool: PgPool,
}

impl PostgresCarouselRepository {
    /// Creates a repository over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`CarouselError::PersistenceError`] if the database is
    /// unreachable.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, CarouselError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies pending schema migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`CarouselError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), CarouselError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CarouselError::PersistenceError(e.to_string()))
    }
}

#[async_trait]
impl CarouselItemRepository for PostgresCarouselRepository {
    async fn create(&self, fields: &CarouselItemFields) -> Result<CarouselItem, CarouselError> {
        let row = sqlx::query_as::<_, CarouselItemRow>(&format!(
            "INSERT INTO carousel_items \
             (title, excerpt, image_url, link, button_title, expiration_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&fields.title)
        .bind(&fields.excerpt)
        .bind(&fields.image_url)
        .bind(&fields.link)
        .bind(&fields.button_title)
        .bind(fields.expiration_date)
        .bind(fields.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, id: CarouselItemId) -> Result<Option<CarouselItem>, CarouselError> {
        let row = sqlx::query_as::<_, CarouselItemRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM carousel_items WHERE carousel_item_id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, item: &CarouselItem) -> Result<(), CarouselError> {
        let fields = &item.fields;
        let result = sqlx::query(
            "UPDATE carousel_items SET title = $2, excerpt = $3, image_url = $4, link = $5, \
             button_title = $6, expiration_date = $7, status = $8 WHERE carousel_item_id = $1",
        )
        .bind(item.id.get())
        .bind(&fields.title)
        .bind(&fields.excerpt)
        .bind(&fields.image_url)
        .bind(&fields.link)
        .bind(&fields.button_title)
        .bind(fields.expiration_date)
        .bind(fields.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CarouselError::CarouselItemNotFound(item.id));
        }
        Ok(())
    }

    async fn delete(&self, item: &CarouselItem) -> Result<(), CarouselError> {
        let result = sqlx::query("DELETE FROM carousel_items WHERE carousel_item_id = $1")
            .bind(item.id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CarouselError::CarouselItemNotFound(item.id));
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<CarouselItem>, CarouselError> {
        let rows = sqlx::query_as::<_, CarouselItemRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM carousel_items ORDER BY carousel_item_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
