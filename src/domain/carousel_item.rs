//! Carousel item entity and the active-item selection rule.

use chrono::{DateTime, Utc};

use super::CarouselItemId;

/// The seven mutable fields of a carousel item.
///
/// Create and update both take a complete `CarouselItemFields`; there is
/// no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItemFields {
    /// Banner headline.
    pub title: String,
    /// Short text shown under the headline.
    pub excerpt: String,
    /// Background image URL.
    pub image_url: String,
    /// Target of the call-to-action button.
    pub link: String,
    /// Label of the call-to-action button.
    pub button_title: String,
    /// Expiration instant; `None` means the item never expires.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Whether the item is enabled.
    pub status: bool,
}

/// A persisted carousel item: a repository-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItem {
    /// Repository-assigned identifier (immutable).
    pub id: CarouselItemId,
    /// Current field values.
    pub fields: CarouselItemFields,
}

impl CarouselItem {
    /// Creates an item from an id and its field values.
    #[must_use]
    pub const fn new(id: CarouselItemId, fields: CarouselItemFields) -> Self {
        Self { id, fields }
    }

    /// Returns a new item with the same id and every field replaced.
    #[must_use]
    pub fn replaced_with(&self, fields: CarouselItemFields) -> Self {
        Self { id: self.id, fields }
    }

    /// Returns `true` if the item should be shown at `now`.
    ///
    /// An item is active when it is enabled and either never expires or
    /// expires at or after `now` (the boundary is inclusive).
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.fields.status
            && self
                .fields
                .expiration_date
                .is_none_or(|expires_at| expires_at >= now)
    }
}

/// Keeps the active items of `items`, preserving their relative order.
#[must_use]
pub fn select_active(items: Vec<CarouselItem>, now: DateTime<Utc>) -> Vec<CarouselItem> {
    items.into_iter().filter(|item| item.is_active(now)).collect()
}
