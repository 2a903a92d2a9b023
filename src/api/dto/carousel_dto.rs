//! Carousel item DTOs and request-body validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{CarouselItem, CarouselItemFields};
use crate::error::CarouselError;

/// Request body for `POST /carousel-items` and `PUT /carousel-items/{id}`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a [`CarouselError::InvalidRequest`] naming it, rather than
/// as a generic deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CarouselItemRequest {
    /// Banner headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Short text shown under the headline.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Background image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Call-to-action target.
    #[serde(default)]
    pub link: Option<String>,
    /// Call-to-action label.
    #[serde(default, rename = "buttonTitle", alias = "button_title")]
    pub button_title: Option<String>,
    /// RFC 3339 timestamp or unix seconds; absent, `null` or `""` means
    /// the item never expires.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2030-01-01T00:00:00Z")]
    pub expiration_date: Option<Value>,
    /// Enabled flag: `true`/`false`, `"true"`/`"false"`, `1`/`0`.
    #[serde(default)]
    #[schema(value_type = bool)]
    pub status: Option<Value>,
}

impl TryFrom<CarouselItemRequest> for CarouselItemFields {
    type Error = CarouselError;

    fn try_from(req: CarouselItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required_string("title", req.title)?,
            excerpt: required_string("excerpt", req.excerpt)?,
            image_url: required_string("image_url", req.image_url)?,
            link: required_string("link", req.link)?,
            button_title: required_string("buttonTitle", req.button_title)?,
            expiration_date: optional_timestamp("expiration_date", req.expiration_date)?,
            status: required_bool("status", req.status)?,
        })
    }
}

/// A carousel item as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarouselItemDto {
    /// Item identifier.
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
    /// Expiration instant, `null` if the item never expires.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Enabled flag.
    pub status: bool,
}

impl From<CarouselItem> for CarouselItemDto {
    fn from(item: CarouselItem) -> Self {
        let fields = item.fields;
        Self {
            carousel_item_id: item.id.get(),
            title: fields.title,
            excerpt: fields.excerpt,
            image_url: fields.image_url,
            link: fields.link,
            button_title: fields.button_title,
            expiration_date: fields.expiration_date,
            status: fields.status,
        }
    }
}

/// Response body for `GET /carousel-items` and `GET /carousel-items/active`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarouselItemListResponse {
    /// Items in repository order.
    #[serde(rename = "carouselItems")]
    pub carousel_items: Vec<CarouselItemDto>,
}

impl From<Vec<CarouselItem>> for CarouselItemListResponse {
    fn from(items: Vec<CarouselItem>) -> Self {
        Self {
            carousel_items: items.into_iter().map(Into::into).collect(),
        }
    }
}

fn required_string(field: &str, value: Option<String>) -> Result<String, CarouselError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(CarouselError::InvalidRequest(format!("{field} must not be empty"))),
        None => Err(CarouselError::InvalidRequest(format!("missing {field}"))),
    }
}

fn required_bool(field: &str, value: Option<Value>) -> Result<bool, CarouselError> {
    let invalid = || CarouselError::InvalidRequest(format!("invalid {field}: expected a boolean"));
    match value {
        None | Some(Value::Null) => Err(CarouselError::InvalidRequest(format!("missing {field}"))),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(invalid()),
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

fn optional_timestamp(
    field: &str,
    value: Option<Value>,
) -> Result<Option<DateTime<Utc>>, CarouselError> {
    let invalid = || {
        CarouselError::InvalidRequest(format!(
            "invalid {field}: expected RFC 3339 or unix seconds"
        ))
    };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(Some)
            .ok_or_else(invalid),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if let Ok(secs) = s.parse::<i64>() {
                return DateTime::from_timestamp(secs, 0).map(Some).ok_or_else(invalid);
            }
            DateTime::parse_from_rfc3339(s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|_| invalid())
        }
        Some(_) => Err(invalid()),
    }
}
