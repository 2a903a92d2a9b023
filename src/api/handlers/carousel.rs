//! Carousel item handlers: create, update, delete, list, list active.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{CarouselItemListResponse, CarouselItemRequest, StatusResponse};
use crate::app_state::AppState;
use crate::domain::{CarouselItemFields, CarouselItemId, Credentials};
use crate::error::{CarouselError, ErrorResponse};

/// `POST /carousel-items` — Create a carousel item (admin only).
///
/// # Errors
///
/// Returns [`CarouselError`] on missing credentials, a non-admin caller,
/// an invalid body, or persistence failure.
#[utoipa::path(
    post,
    path = "/api/v1/carousel-items",
    tag = "Carousel",
    summary = "Create a carousel item",
    description = "Creates a homepage banner slot. Requires a system admin bearer token.",
    request_body = CarouselItemRequest,
    responses(
        (status = 200, description = "Item created", body = StatusResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Caller is not a system admin", body = ErrorResponse),
    )
)]
pub async fn create_carousel_item(
    State(state): State<AppState>,
    credentials: Credentials,
    payload: Result<Json<CarouselItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CarouselError> {
    let service = &state.carousel_service;
    let admin = service.authorize_admin(&credentials).await?;
    let fields = parse_body(payload)?;
    service.create(&admin, fields).await?;
    Ok(Json(StatusResponse::ok()))
}

/// `PUT /carousel-items/{id}` — Replace every field of a carousel item.
///
/// # Errors
///
/// Returns [`CarouselError::CarouselItemNotFound`] if the item does not
/// exist, or an auth/validation error.
#[utoipa::path(
    put,
    path = "/api/v1/carousel-items/{id}",
    tag = "Carousel",
    summary = "Update a carousel item",
    description = "Fully replaces all fields of an existing item. There is no partial update.",
    params(
        ("id" = i64, Path, description = "Carousel item id"),
    ),
    request_body = CarouselItemRequest,
    responses(
        (status = 200, description = "Item updated", body = StatusResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Caller is not a system admin", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn update_carousel_item(
    State(state): State<AppState>,
    credentials: Credentials,
    Path(raw_id): Path<String>,
    payload: Result<Json<CarouselItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CarouselError> {
    let service = &state.carousel_service;
    let admin = service.authorize_admin(&credentials).await?;
    let id = parse_item_id(&raw_id)?;
    let fields = parse_body(payload)?;
    service.update(&admin, id, fields).await?;
    Ok(Json(StatusResponse::ok()))
}

/// `DELETE /carousel-items/{id}` — Permanently remove a carousel item.
///
/// # Errors
///
/// Returns [`CarouselError::CarouselItemNotFound`] if the item does not
/// exist, or an auth/validation error.
#[utoipa::path(
    delete,
    path = "/api/v1/carousel-items/{id}",
    tag = "Carousel",
    summary = "Delete a carousel item",
    params(
        ("id" = i64, Path, description = "Carousel item id"),
    ),
    responses(
        (status = 200, description = "Item deleted", body = StatusResponse),
        (status = 400, description = "Invalid carousel item id", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Caller is not a system admin", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn delete_carousel_item(
    State(state): State<AppState>,
    credentials: Credentials,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, CarouselError> {
    let service = &state.carousel_service;
    let admin = service.authorize_admin(&credentials).await?;
    let id = parse_item_id(&raw_id)?;
    service.delete(&admin, id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// `GET /carousel-items` — List every carousel item (admin only).
///
/// # Errors
///
/// Returns an auth error or a persistence error.
#[utoipa::path(
    get,
    path = "/api/v1/carousel-items",
    tag = "Carousel",
    summary = "List all carousel items",
    responses(
        (status = 200, description = "All items", body = CarouselItemListResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Caller is not a system admin", body = ErrorResponse),
    )
)]
pub async fn list_carousel_items(
    State(state): State<AppState>,
    credentials: Credentials,
) -> Result<impl IntoResponse, CarouselError> {
    let service = &state.carousel_service;
    let admin = service.authorize_admin(&credentials).await?;
    let items = service.list_all(&admin).await?;
    Ok(Json(CarouselItemListResponse::from(items)))
}

/// `GET /carousel-items/active` — List items to render on the homepage.
///
/// # Errors
///
/// Returns a persistence error.
#[utoipa::path(
    get,
    path = "/api/v1/carousel-items/active",
    tag = "Carousel",
    summary = "List active carousel items",
    description = "Public. Returns enabled items that have not expired yet.",
    responses(
        (status = 200, description = "Active items", body = CarouselItemListResponse),
    )
)]
pub async fn list_active_carousel_items(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CarouselError> {
    let items = state.carousel_service.list_active().await?;
    Ok(Json(CarouselItemListResponse::from(items)))
}

/// Carousel item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/carousel-items", post(create_carousel_item).get(list_carousel_items))
        .route("/carousel-items/active", get(list_active_carousel_items))
        .route("/carousel-items/{id}", put(update_carousel_item).delete(delete_carousel_item))
}

fn parse_item_id(raw: &str) -> Result<CarouselItemId, CarouselError> {
    raw.parse()
        .map_err(|_| CarouselError::InvalidRequest(format!("invalid carousel_item_id: {raw:?}")))
}

fn parse_body(
    payload: Result<Json<CarouselItemRequest>, JsonRejection>,
) -> Result<CarouselItemFields, CarouselError> {
    let Json(req) = payload.map_err(|rejection| {
        CarouselError::InvalidRequest(format!("malformed body: {}", rejection.body_text()))
    })?;
    CarouselItemFields::try_from(req)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::api;
    use crate::app_state::AppState;
    use crate::domain::{AdminRoster, FixedClock, TokenAuthenticator};
    use crate::persistence::InMemoryCarouselRepository;
    use crate::service::CarouselItemService;

    fn app() -> axum::Router {
        let mut auth = TokenAuthenticator::default();
        auth.insert("admin-token", "root");
        auth.insert("user-token", "guest");
        let now = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        let service = CarouselItemService::new(
            Arc::new(InMemoryCarouselRepository::new()),
            Arc::new(auth),
            Arc::new(AdminRoster::new(["root"])),
            Arc::new(FixedClock::new(now)),
        );
        api::build_router().with_state(AppState::new(service))
    }

    fn request(
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let Ok(req) = builder.body(body) else {
            panic!("request build failed");
        };
        req
    }

    fn active_request() -> Request<Body> {
        request(Method::GET, "/api/v1/carousel-items/active", None, None)
    }

    async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
        let Ok(response) = app.clone().oneshot(req).await else {
            panic!("router call failed");
        };
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn promo(status: bool, expiration_date: Value) -> Value {
        json!({
            "title": "Promo",
            "excerpt": "e",
            "image_url": "u",
            "link": "l",
            "buttonTitle": "Go",
            "expiration_date": expiration_date,
            "status": status
        })
    }

    fn items(body: &Value) -> Vec<Value> {
        body.get("carouselItems")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn create_then_list_active() {
        let app = app();
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/v1/carousel-items",
                Some("admin-token"),
                Some(promo(true, Value::Null)),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));

        let (status, body) = send(&app, active_request()).await;
        assert_eq!(status, StatusCode::OK);
        let active = items(&body);
        assert_eq!(active.len(), 1);
        assert_eq!(active.first().and_then(|i| i.get("title")), Some(&json!("Promo")));
        assert_eq!(active.first().and_then(|i| i.get("carousel_item_id")), Some(&json!(1)));
    }

    #[tokio::test]
    async fn disabled_item_only_visible_to_admin_list() {
        let app = app();
        let _ = send(
            &app,
            request(
                Method::POST,
                "/api/v1/carousel-items",
                Some("admin-token"),
                Some(promo(false, Value::Null)),
            ),
        )
        .await;

        let (_, active) = send(&app, active_request()).await;
        assert!(items(&active).is_empty());

        let (status, all) = send(
            &app,
            request(Method::GET, "/api/v1/carousel-items", Some("admin-token"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(items(&all).len(), 1);
    }

    #[tokio::test]
    async fn expired_item_is_hidden() {
        let app = app();
        let _ = send(
            &app,
            request(
                Method::POST,
                "/api/v1/carousel-items",
                Some("admin-token"),
                Some(promo(true, json!("2024-04-30T12:00:00Z"))),
            ),
        )
        .await;

        let (_, active) = send(&app, active_request()).await;
        assert!(items(&active).is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let app = app();
        let (status, body) = send(
            &app,
            request(Method::DELETE, "/api/v1/carousel-items/9999", Some("admin-token"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.pointer("/error/key"), Some(&json!("carouselItemNotFound")));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let app = app();
        let _ = send(
            &app,
            request(
                Method::POST,
                "/api/v1/carousel-items",
                Some("admin-token"),
                Some(promo(true, Value::Null)),
            ),
        )
        .await;

        let mut replacement = promo(true, json!("2030-01-01T00:00:00Z"));
        replacement["title"] = json!("Renamed");
        let (status, _) = send(
            &app,
            request(
                Method::PUT,
                "/api/v1/carousel-items/1",
                Some("admin-token"),
                Some(replacement),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, all) = send(
            &app,
            request(Method::GET, "/api/v1/carousel-items", Some("admin-token"), None),
        )
        .await;
        let first = items(&all).into_iter().next().unwrap_or_default();
        assert_eq!(first.get("title"), Some(&json!("Renamed")));
        assert_eq!(first.get("carousel_item_id"), Some(&json!(1)));
        assert!(first.get("expiration_date").is_some_and(|v| !v.is_null()));
    }

    #[tokio::test]
    async fn admin_routes_reject_anonymous_and_non_admin() {
        let app = app();
        let cases = [
            (Method::POST, "/api/v1/carousel-items", Some(promo(true, Value::Null))),
            (Method::GET, "/api/v1/carousel-items", None),
            (Method::PUT, "/api/v1/carousel-items/1", Some(promo(true, Value::Null))),
            (Method::DELETE, "/api/v1/carousel-items/1", None),
        ];
        for (method, uri, body) in cases {
            let (status, _) = send(&app, request(method.clone(), uri, None, body.clone())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri} anonymous");

            let non_admin = request(method.clone(), uri, Some("user-token"), body);
            let (status, _) = send(&app, non_admin).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri} non-admin");
        }
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let app = app();
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/v1/carousel-items",
                Some("admin-token"),
                Some(json!({ "title": "only a title" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.pointer("/error/key"), Some(&json!("parameterInvalid")));
    }

    #[tokio::test]
    async fn non_integer_id_is_bad_request() {
        let app = app();
        let (status, _) = send(
            &app,
            request(Method::DELETE, "/api/v1/carousel-items/abc", Some("admin-token"), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn auth_gate_runs_before_body_and_id_parsing() {
        let app = app();
        let cases = [
            (Method::POST, "/api/v1/carousel-items", Some("user-token"), Some(json!({}))),
            (Method::POST, "/api/v1/carousel-items", None, Some(json!({}))),
            (Method::PUT, "/api/v1/carousel-items/abc", None, Some(promo(true, Value::Null))),
            (Method::PUT, "/api/v1/carousel-items/abc", Some("user-token"), Some(json!({}))),
            (Method::DELETE, "/api/v1/carousel-items/abc", None, None),
            (Method::DELETE, "/api/v1/carousel-items/abc", Some("user-token"), None),
        ];
        for (method, uri, token, body) in cases {
            let expected = if token.is_some() {
                StatusCode::FORBIDDEN
            } else {
                StatusCode::UNAUTHORIZED
            };
            let (status, _) = send(&app, request(method.clone(), uri, token, body)).await;
            assert_eq!(status, expected, "{method} {uri} token={token:?}");
        }
    }

    #[tokio::test]
    async fn malformed_json_from_admin_is_bad_request() {
        let app = app();
        let Ok(req) = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/carousel-items")
            .header("authorization", "Bearer admin-token")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
        else {
            panic!("request build failed");
        };
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.pointer("/error/key"), Some(&json!("parameterInvalid")));
    }

    #[tokio::test]
    async fn session_cookie_authenticates() {
        let app = app();
        let Ok(req) = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/carousel-items")
            .header("cookie", "ouat=admin-token")
            .body(Body::empty())
        else {
            panic!("request build failed");
        };
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
    }
}
