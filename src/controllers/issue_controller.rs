use crate::dto::issue_dto::{CreateIssueRequest, UpdateIssueRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Issue;
use crate::repositories::component_repository::ComponentRepository;
use crate::repositories::issue_repository::{IssueChanges, IssueRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::authorization_service::owner_scope;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct IssueController {
    repository: IssueRepository,
    vehicles: VehicleRepository,
    components: ComponentRepository,
}

impl IssueController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: IssueRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            components: ComponentRepository::new(pool),
        }
    }

    /// El vehículo debe ser visible para el usuario; si no, 404
    async fn ensure_vehicle(&self, user: &AuthenticatedUser, vehicle_id: Uuid) -> Result<(), AppError> {
        self.vehicles
            .find_by_id(vehicle_id, owner_scope(user))
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id))?;
        Ok(())
    }

    async fn ensure_component(&self, component_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(component_id) = component_id {
            if self.components.find_by_id(component_id).await?.is_none() {
                return Err(validation_error("component_id", "component does not exist"));
            }
        }
        Ok(())
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        vehicle_id: Uuid,
        request: CreateIssueRequest,
    ) -> Result<Issue, AppError> {
        request.validate()?;
        self.ensure_vehicle(user, vehicle_id).await?;
        self.ensure_component(request.component_id).await?;

        let issue = self
            .repository
            .create(vehicle_id, request.component_id, request.description, request.is_repair)
            .await?;

        tracing::info!("🔧 Issue {} registrado en vehículo {}", issue.id, vehicle_id);
        Ok(issue)
    }

    pub async fn get_by_id(
        &self,
        user: &AuthenticatedUser,
        vehicle_id: Uuid,
        id: Uuid,
    ) -> Result<Issue, AppError> {
        self.ensure_vehicle(user, vehicle_id).await?;

        self.repository
            .find_in_vehicle(id, vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Issue", &id))
    }

    pub async fn list_by_vehicle(
        &self,
        user: &AuthenticatedUser,
        vehicle_id: Uuid,
    ) -> Result<Vec<Issue>, AppError> {
        self.ensure_vehicle(user, vehicle_id).await?;
        self.repository.list_by_vehicle(vehicle_id).await
    }

    /// Todos los issues visibles para el usuario
    pub async fn list_all(&self, user: &AuthenticatedUser) -> Result<Vec<Issue>, AppError> {
        self.repository.list_all(owner_scope(user)).await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        vehicle_id: Uuid,
        id: Uuid,
        request: UpdateIssueRequest,
    ) -> Result<Issue, AppError> {
        request.validate()?;
        self.ensure_vehicle(user, vehicle_id).await?;
        self.ensure_component(request.component_id.flatten()).await?;

        let changes = IssueChanges {
            component_id: request.component_id,
            description: request.description,
            is_repair: request.is_repair,
        };

        self.repository
            .update(id, vehicle_id, changes)
            .await?
            .ok_or_else(|| not_found_error("Issue", &id))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, vehicle_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.ensure_vehicle(user, vehicle_id).await?;

        if !self.repository.delete(id, vehicle_id).await? {
            return Err(not_found_error("Issue", &id));
        }

        tracing::info!("🗑️ Issue eliminado: {}", id);
        Ok(())
    }
}
