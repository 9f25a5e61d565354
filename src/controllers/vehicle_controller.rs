use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Vehicle;
use crate::repositories::vehicle_repository::{VehicleChanges, VehicleRepository};
use crate::services::authorization_service::owner_scope;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        request.validate()?;

        // Un propietario siempre registra a su nombre
        let owner_id = match owner_scope(user) {
            Some(self_id) => self_id,
            None => request.owner_id.unwrap_or(user.user_id),
        };

        let vehicle = self
            .repository
            .create(
                owner_id,
                request.make,
                request.license_plate.trim().to_uppercase(),
                request.model,
                request.year,
            )
            .await?;

        tracing::info!("🚗 Vehículo {} creado para {}", vehicle.license_plate, owner_id);
        Ok(vehicle)
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id, owner_scope(user))
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id))
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<Vehicle>, AppError> {
        self.repository.list(owner_scope(user)).await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        request.validate()?;

        let scope = owner_scope(user);
        let changes = VehicleChanges {
            // Reasignar propietario es cosa del taller
            owner_id: if scope.is_none() { request.owner_id } else { None },
            make: request.make,
            license_plate: request.license_plate.map(|plate| plate.trim().to_uppercase()),
            model: request.model,
            year: request.year,
        };

        self.repository
            .update(id, scope, changes)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, owner_scope(user)).await? {
            return Err(not_found_error("Vehicle", &id));
        }

        tracing::info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }
}
