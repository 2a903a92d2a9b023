//! Carousel item service: admin gate plus repository delegation.

use std::sync::Arc;

use crate::domain::carousel_item::select_active;
use crate::domain::{
    AuthContext, Authorization, CarouselItem, CarouselItemFields, CarouselItemId, Clock,
    Credentials, Identity,
};
use crate::error::CarouselError;
use crate::persistence::CarouselItemRepository;

/// Orchestration layer for all carousel item operations.
///
/// Stateless coordinator: every collaborator is injected behind a trait
/// object, so the service itself holds no per-request state and can be
/// cloned freely into handler state. Admin operations take an
/// [`AdminSession`] minted by [`authorize_admin`](Self::authorize_admin),
/// so the gate always runs before any request parameter is used.
#[derive(Debug, Clone)]
pub struct CarouselItemService {
    repository: Arc<dyn CarouselItemRepository>,
    auth: Arc<dyn AuthContext>,
    authorization: Arc<dyn Authorization>,
    clock: Arc<dyn Clock>,
}

impl CarouselItemService {
    /// Creates a new `CarouselItemService`.
    #[must_use]
    pub fn new(
        repository: Arc<dyn CarouselItemRepository>,
        auth: Arc<dyn AuthContext>,
        authorization: Arc<dyn Authorization>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            auth,
            authorization,
            clock,
        }
    }

    /// Returns a reference to the inner repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn CarouselItemRepository> {
        &self.repository
    }

    /// Resolves the caller and checks system-admin privileges.
    ///
    /// Every admin operation requires the returned [`AdminSession`], so
    /// callers must pass this gate before touching request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::AuthenticationRequired`] if no identity can
    /// be resolved, or [`CarouselError::ForbiddenAccess`] if the identity
    /// is not a system admin.
    pub async fn authorize_admin(
        &self,
        credentials: &Credentials,
    ) -> Result<AdminSession, CarouselError> {
        let identity = self.auth.resolve_identity(credentials).await?;
        if !self.authorization.is_system_admin(&identity) {
            tracing::warn!(username = %identity.username, "non-admin attempted admin operation");
            return Err(CarouselError::ForbiddenAccess);
        }
        Ok(AdminSession { identity })
    }

    /// Creates a new carousel item.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    pub async fn create(
        &self,
        admin: &AdminSession,
        fields: CarouselItemFields,
    ) -> Result<CarouselItemId, CarouselError> {
        let item = self.repository.create(&fields).await?;
        tracing::info!(
            carousel_item_id = %item.id,
            admin = %admin.username(),
            "carousel item created"
        );
        Ok(item.id)
    }

    /// Permanently deletes a carousel item.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::CarouselItemNotFound`] if no item has `id`,
    /// or a persistence error.
    pub async fn delete(
        &self,
        admin: &AdminSession,
        id: CarouselItemId,
    ) -> Result<(), CarouselError> {
        let item = self.load(id).await?;
        self.repository.delete(&item).await?;
        tracing::info!(
            carousel_item_id = %id,
            admin = %admin.username(),
            "carousel item deleted"
        );
        Ok(())
    }

    /// Replaces every field of an existing carousel item.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::CarouselItemNotFound`] if no item has `id`,
    /// or a persistence error.
    pub async fn update(
        &self,
        admin: &AdminSession,
        id: CarouselItemId,
        fields: CarouselItemFields,
    ) -> Result<(), CarouselError> {
        let existing = self.load(id).await?;
        let updated = existing.replaced_with(fields);
        self.repository.update(&updated).await?;
        tracing::info!(
            carousel_item_id = %id,
            admin = %admin.username(),
            "carousel item updated"
        );
        Ok(())
    }

    /// Lists every carousel item in repository order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    pub async fn list_all(
        &self,
        _admin: &AdminSession,
    ) -> Result<Vec<CarouselItem>, CarouselError> {
        self.repository.get_all().await
    }

    /// Lists the items currently active, preserving repository order.
    ///
    /// Public: no credentials are checked.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    pub async fn list_active(&self) -> Result<Vec<CarouselItem>, CarouselError> {
        let items = self.repository.get_all().await?;
        let now = self.clock.now();
        let active = select_active(items, now);
        tracing::debug!(count = active.len(), %now, "active carousel items selected");
        Ok(active)
    }

    async fn load(&self, id: CarouselItemId) -> Result<CarouselItem, CarouselError> {
        self.repository
            .get(id)
            .await?
            .ok_or(CarouselError::CarouselItemNotFound(id))
    }
}

/// Proof that a caller passed the admin gate.
///
/// Only [`CarouselItemService::authorize_admin`] can construct one.
#[derive(Debug, Clone)]
pub struct AdminSession {
    identity: Identity,
}

impl AdminSession {
    /// Returns the authenticated admin identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    fn username(&self) -> &str {
        &self.identity.username
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::domain::{AdminRoster, FixedClock, TokenAuthenticator};
    use crate::persistence::InMemoryCarouselRepository;

    const ADMIN: &str = "admin-token";
    const USER: &str = "user-token";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn make_service() -> CarouselItemService {
        let mut auth = TokenAuthenticator::default();
        auth.insert(ADMIN, "root");
        auth.insert(USER, "guest");
        CarouselItemService::new(
            Arc::new(InMemoryCarouselRepository::new()),
            Arc::new(auth),
            Arc::new(AdminRoster::new(["root"])),
            Arc::new(FixedClock::new(now())),
        )
    }

    fn promo(status: bool, expiration_date: Option<DateTime<Utc>>) -> CarouselItemFields {
        CarouselItemFields {
            title: "Promo".to_string(),
            excerpt: "e".to_string(),
            image_url: "u".to_string(),
            link: "l".to_string(),
            button_title: "Go".to_string(),
            expiration_date,
            status,
        }
    }

    async fn admin(service: &CarouselItemService) -> AdminSession {
        let Ok(session) = service.authorize_admin(&Credentials::bearer(ADMIN)).await else {
            panic!("admin token should pass the gate");
        };
        session
    }

    async fn create(service: &CarouselItemService, fields: CarouselItemFields) -> CarouselItemId {
        let Ok(id) = service.create(&admin(service).await, fields).await else {
            panic!("create failed");
        };
        id
    }

    async fn active_ids(service: &CarouselItemService) -> Vec<CarouselItemId> {
        let Ok(items) = service.list_active().await else {
            panic!("list_active failed");
        };
        items.into_iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn create_round_trips_through_repository() {
        let service = make_service();
        let id = create(&service, promo(true, None)).await;

        let Ok(Some(stored)) = service.repository().get(id).await else {
            panic!("item should be stored");
        };
        assert_eq!(stored.fields, promo(true, None));
    }

    #[tokio::test]
    async fn enabled_item_is_listed_as_active() {
        let service = make_service();
        let id = create(&service, promo(true, None)).await;
        assert_eq!(active_ids(&service).await, vec![id]);
    }

    #[tokio::test]
    async fn disabled_item_is_only_in_admin_list() {
        let service = make_service();
        let id = create(&service, promo(false, None)).await;

        assert!(active_ids(&service).await.is_empty());

        let Ok(all) = service.list_all(&admin(&service).await).await else {
            panic!("list_all failed");
        };
        assert_eq!(all.iter().map(|i| i.id).collect::<Vec<_>>(), vec![id]);
    }

    #[tokio::test]
    async fn expired_item_is_not_active() {
        let service = make_service();
        let _ = create(&service, promo(true, Some(now() - Duration::days(1)))).await;
        assert!(active_ids(&service).await.is_empty());
    }

    #[tokio::test]
    async fn expiring_exactly_now_is_active() {
        let service = make_service();
        let id = create(&service, promo(true, Some(now()))).await;
        assert_eq!(active_ids(&service).await, vec![id]);
    }

    #[tokio::test]
    async fn list_active_preserves_repository_order() {
        let service = make_service();
        let first = create(&service, promo(true, None)).await;
        let _ = create(&service, promo(false, None)).await;
        let third = create(&service, promo(true, Some(now() + Duration::days(3)))).await;
        let _ = create(&service, promo(true, Some(now() - Duration::seconds(1)))).await;
        let fifth = create(&service, promo(true, None)).await;

        assert_eq!(active_ids(&service).await, vec![first, third, fifth]);
    }

    #[tokio::test]
    async fn delete_nonexistent_is_not_found() {
        let service = make_service();
        let result = service.delete(&admin(&service).await, CarouselItemId::new(9999)).await;
        let Err(err) = result else {
            panic!("expected NotFound");
        };
        assert!(matches!(err, CarouselError::CarouselItemNotFound(id) if id.get() == 9999));
        assert_eq!(err.error_key(), "carouselItemNotFound");
    }

    #[tokio::test]
    async fn delete_removes_item_and_is_not_idempotent() {
        let service = make_service();
        let id = create(&service, promo(true, None)).await;

        assert!(service.delete(&admin(&service).await, id).await.is_ok());
        assert!(active_ids(&service).await.is_empty());

        let again = service.delete(&admin(&service).await, id).await;
        assert!(matches!(again, Err(CarouselError::CarouselItemNotFound(_))));
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let service = make_service();
        let id = create(&service, promo(true, None)).await;

        let replacement = CarouselItemFields {
            title: "New".to_string(),
            excerpt: "new excerpt".to_string(),
            image_url: "https://img/new.png".to_string(),
            link: "/new".to_string(),
            button_title: "See".to_string(),
            expiration_date: Some(now() + Duration::days(7)),
            status: false,
        };
        assert!(service.update(&admin(&service).await, id, replacement.clone()).await.is_ok());

        let Ok(Some(stored)) = service.repository().get(id).await else {
            panic!("item should still exist");
        };
        assert_eq!(stored.id, id);
        assert_eq!(stored.fields, replacement);
    }

    #[tokio::test]
    async fn update_nonexistent_is_not_found() {
        let service = make_service();
        let result = service
            .update(&admin(&service).await, CarouselItemId::new(42), promo(true, None))
            .await;
        assert!(matches!(result, Err(CarouselError::CarouselItemNotFound(_))));
    }

    #[tokio::test]
    async fn admin_token_yields_session_for_identity() {
        let service = make_service();
        let session = admin(&service).await;
        assert_eq!(session.identity().username, "root");
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let service = make_service();
        let result = service.authorize_admin(&Credentials::bearer(USER)).await;
        assert!(matches!(result, Err(CarouselError::ForbiddenAccess)));
    }

    #[tokio::test]
    async fn anonymous_or_unknown_token_requires_authentication() {
        let service = make_service();
        let anon = service.authorize_admin(&Credentials::anonymous()).await;
        assert!(matches!(anon, Err(CarouselError::AuthenticationRequired)));

        let unknown = service.authorize_admin(&Credentials::bearer("stale")).await;
        assert!(matches!(unknown, Err(CarouselError::AuthenticationRequired)));
    }
}
