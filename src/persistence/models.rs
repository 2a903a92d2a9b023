//! Database row model for the `carousel_items` table.

use chrono::{DateTime, Utc};

use crate::domain::{CarouselItem, CarouselItemFields, CarouselItemId};

/// A stored row from the `carousel_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CarouselItemRow {
    /// `BIGSERIAL` primary key.
    pub carousel_item_id: i64,
    /// Banner headline.
    pub title: String,
    /// Short text shown under the headline.
    pub excerpt: String,
    /// Background image URL.
    pub image_url: String,
    /// Call-to-action target.
    pub link: String,
    /// Call-to-action label.
    pub button_title: String,
    /// Nullable expiration timestamp.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Enabled flag.
    pub status: bool,
}

impl From<CarouselItemRow> for CarouselItem {
    fn from(row: CarouselItemRow) -> Self {
        Self::new(
            CarouselItemId::new(row.carousel_item_id),
            CarouselItemFields {
                title: row.title,
                excerpt: row.excerpt,
                image_url: row.image_url,
                link: row.link,
                button_title: row.button_title,
                expiration_date: row.expiration_date,
                status: row.status,
            },
        )
    }
}
