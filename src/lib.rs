//! # carousel-service
//!
//! REST service for the homepage carousel: admins create, update, delete
//! and list banner items; anyone may list the items that are currently
//! active.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + Extractors (api/)
//!     │
//!     ├── CarouselItemService (service/)
//!     │     ├── AuthContext / Authorization (domain/auth)
//!     │     └── Clock (domain/clock)
//!     │
//!     └── CarouselItemRepository (persistence/)
//!           ├── in-memory
//!           └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
