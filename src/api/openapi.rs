//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{
    CarouselItemDto, CarouselItemListResponse, CarouselItemRequest, StatusResponse,
};
use crate::api::handlers::system::HealthResponse;
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "carousel-service",
        description = "Homepage carousel banner administration and public listing."
    ),
    paths(
        crate::api::handlers::system::health_handler,
        crate::api::handlers::carousel::create_carousel_item,
        crate::api::handlers::carousel::list_carousel_items,
        crate::api::handlers::carousel::list_active_carousel_items,
        crate::api::handlers::carousel::update_carousel_item,
        crate::api::handlers::carousel::delete_carousel_item,
    ),
    components(schemas(
        HealthResponse,
        CarouselItemRequest,
        CarouselItemDto,
        CarouselItemListResponse,
        StatusResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Carousel", description = "Carousel item management"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
