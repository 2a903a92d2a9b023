//! Type-safe carousel item identifier.
//!
//! [`CarouselItemId`] is a newtype wrapper around the `i64` primary key of
//! the `carousel_items` table so that item identifiers cannot be confused
//! with other integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a carousel item.
///
/// Assigned by the repository when an item is created and immutable
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarouselItemId(i64);

impl CarouselItemId {
    /// Wraps a raw primary key value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw primary key value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CarouselItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CarouselItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for CarouselItemId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<CarouselItemId> for i64 {
    fn from(id: CarouselItemId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(CarouselItemId::new(42).to_string(), "42");
    }

    #[test]
    fn serializes_transparently() {
        let Ok(json) = serde_json::to_string(&CarouselItemId::new(7)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");
    }

    #[test]
    fn parses_from_path_segment() {
        assert_eq!("  15 ".parse::<CarouselItemId>().ok(), Some(CarouselItemId::new(15)));
        assert!("abc".parse::<CarouselItemId>().is_err());
    }

    #[test]
    fn orders_by_raw_value() {
        assert!(CarouselItemId::new(1) < CarouselItemId::new(2));
    }
}
