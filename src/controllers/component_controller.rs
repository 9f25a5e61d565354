use crate::dto::component_dto::{CreateComponentRequest, UpdateComponentRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Component;
use crate::repositories::component_repository::ComponentRepository;
use crate::services::authorization_service::require_shop_owner;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ComponentController {
    repository: ComponentRepository,
}

impl ComponentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ComponentRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateComponentRequest,
    ) -> Result<Component, AppError> {
        require_shop_owner(user, "create component")?;
        request.validate()?;

        let component = self
            .repository
            .create(
                request.name.trim().to_string(),
                request.description,
                request.new_price,
                request.repair_price,
            )
            .await?;

        tracing::info!("🔩 Componente creado: {} ({})", component.name, component.id);
        Ok(component)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Component, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Component", &id))
    }

    pub async fn list(&self) -> Result<Vec<Component>, AppError> {
        self.repository.list().await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateComponentRequest,
    ) -> Result<Component, AppError> {
        require_shop_owner(user, "update component")?;
        request.validate()?;

        // Los totales ya guardados en servicios no se recalculan
        self.repository
            .update(
                id,
                request.name.map(|name| name.trim().to_string()),
                request.description,
                request.new_price,
                request.repair_price,
            )
            .await?
            .ok_or_else(|| not_found_error("Component", &id))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        require_shop_owner(user, "delete component")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Component", &id));
        }

        tracing::info!("🗑️ Componente eliminado: {}", id);
        Ok(())
    }
}
