//! Data Transfer Objects for REST request/response serialization.
//!
//! Request DTOs convert into domain types through `TryFrom`, which is
//! where body validation happens.

pub mod carousel_dto;
pub mod common_dto;

pub use carousel_dto::*;
pub use common_dto::*;
