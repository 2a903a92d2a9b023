//! Service layer: business logic orchestration.
//!
//! [`CarouselItemService`] gates operations on caller identity, applies
//! the active-item rule and delegates storage to the
//! [`crate::persistence::CarouselItemRepository`].

pub mod carousel_service;

pub use carousel_service::{AdminSession, CarouselItemService};
