//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned by mutating endpoints: `{"status": "ok"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Always `"ok"` on success.
    pub status: String,
}

impl StatusResponse {
    /// The successful acknowledgement.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
