//! Domain layer: carousel item model, caller identity and time source.
//!
//! This module contains the carousel item entity with its active-item
//! rule, the identity and authorization seams consumed by the service,
//! and the [`Clock`] abstraction used to decide expiration.

pub mod auth;
pub mod carousel_item;
pub mod carousel_item_id;
pub mod clock;

pub use auth::{AdminRoster, AuthContext, Authorization, Credentials, Identity, TokenAuthenticator};
pub use carousel_item::{CarouselItem, CarouselItemFields};
pub use carousel_item_id::CarouselItemId;
pub use clock::{Clock, FixedClock, SystemClock};
