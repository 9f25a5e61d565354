//! Servicios: agrupación de issues y cálculo de coste

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::service_dto::{dedup_issue_ids, CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Issue, RevenueSummary, Service};
use crate::repositories::service_repository::ServiceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::authorization_service::{owner_scope, require_shop_owner};
use crate::services::billing_service::RevenueWindow;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct ServiceController {
    repository: ServiceRepository,
    vehicles: VehicleRepository,
}

impl ServiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateServiceRequest,
    ) -> Result<ServiceResponse, AppError> {
        require_shop_owner(user, "create service")?;
        request.validate()?;

        if self.vehicles.find_by_id(request.vehicle_id, None).await?.is_none() {
            return Err(validation_error("vehicle", "vehicle does not exist"));
        }

        let issue_ids = dedup_issue_ids(request.issues);
        let service = self.repository.create_with_issues(request.vehicle_id, &issue_ids).await?;

        tracing::info!(
            "🛠️ Servicio {} creado para vehículo {} (total {})",
            service.id,
            service.vehicle_id,
            service.total_cost
        );
        self.single_response(service).await
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ServiceResponse, AppError> {
        let service = self
            .repository
            .find_by_id(id, owner_scope(user))
            .await?
            .ok_or_else(|| not_found_error("Service", &id))?;

        self.single_response(service).await
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<ServiceResponse>, AppError> {
        let services = self.repository.list(owner_scope(user)).await?;
        self.responses(services).await
    }

    /// Sustituye los issues del servicio y recalcula el total
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateServiceRequest,
    ) -> Result<ServiceResponse, AppError> {
        require_shop_owner(user, "update service")?;
        request.validate()?;

        let service = self
            .repository
            .find_by_id(id, None)
            .await?
            .ok_or_else(|| not_found_error("Service", &id))?;

        let issue_ids = dedup_issue_ids(request.issues);
        let service = self.repository.replace_issues(&service, &issue_ids).await?;

        tracing::info!("🛠️ Servicio {} actualizado (total {})", service.id, service.total_cost);
        self.single_response(service).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        require_shop_owner(user, "delete service")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Service", &id));
        }

        tracing::info!("🗑️ Servicio eliminado: {}", id);
        Ok(())
    }

    /// Ingresos del día, mes y año en curso (UTC)
    pub async fn revenue_dashboard(&self, user: &AuthenticatedUser) -> Result<RevenueSummary, AppError> {
        require_shop_owner(user, "view revenue dashboard")?;
        self.repository.revenue(RevenueWindow::at(Utc::now())).await
    }

    async fn single_response(&self, service: Service) -> Result<ServiceResponse, AppError> {
        let mut responses = self.responses(vec![service]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::Internal("Service response could not be built".to_string()))
    }

    async fn responses(&self, services: Vec<Service>) -> Result<Vec<ServiceResponse>, AppError> {
        let ids: Vec<Uuid> = services.iter().map(|service| service.id).collect();

        let mut issues_by_service: HashMap<Uuid, Vec<Issue>> = HashMap::new();
        for row in self.repository.issues_for(&ids).await? {
            issues_by_service.entry(row.service_id).or_default().push(row.issue);
        }

        Ok(services
            .into_iter()
            .map(|service| {
                let issues = issues_by_service.remove(&service.id).unwrap_or_default();
                ServiceResponse::new(service, issues)
            })
            .collect())
    }
}
