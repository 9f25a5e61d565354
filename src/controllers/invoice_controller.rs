//! Facturación: emisión, consulta y cobro de facturas

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::invoice_dto::{CreateInvoiceRequest, UpdateInvoiceRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Invoice;
use crate::repositories::invoice_repository::{InvoiceFilters, InvoiceRepository};
use crate::repositories::service_repository::ServiceRepository;
use crate::services::authorization_service::{owner_scope, require_shop_owner};
use crate::services::billing_service::default_due_date;
use crate::utils::errors::{not_found_error, AppError};

pub struct InvoiceController {
    repository: InvoiceRepository,
    services: ServiceRepository,
    due_days: i64,
}

impl InvoiceController {
    pub fn new(pool: PgPool, due_days: i64) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            services: ServiceRepository::new(pool),
            due_days,
        }
    }

    /// Emitir la factura de un servicio: número de la secuencia, importe del servicio
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        service_id: Uuid,
        request: CreateInvoiceRequest,
    ) -> Result<Invoice, AppError> {
        require_shop_owner(user, "create invoice")?;
        request.validate()?;

        let service = self
            .services
            .find_by_id(service_id, None)
            .await?
            .ok_or_else(|| not_found_error("Service", &service_id))?;

        if self.repository.exists_for_service(service.id).await? {
            return Err(AppError::Conflict(format!(
                "Service '{}' already has an invoice",
                service.id
            )));
        }

        let issue_date = Utc::now();
        let due_date = request
            .due_date
            .unwrap_or_else(|| default_due_date(issue_date, self.due_days));
        let invoice_number = self.repository.next_invoice_number().await?;

        // La restricción UNIQUE sobre service_id cubre la carrera entre dos emisiones
        let invoice = self
            .repository
            .create(
                service.id,
                invoice_number,
                issue_date,
                due_date,
                service.total_cost,
                request.paid,
            )
            .await?;

        tracing::info!(
            "🧾 Factura {} emitida para servicio {} ({})",
            invoice.invoice_number,
            service.id,
            invoice.total_amount
        );
        Ok(invoice)
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Invoice, AppError> {
        self.repository
            .find_by_id(id, owner_scope(user))
            .await?
            .ok_or_else(|| not_found_error("Invoice", &id))
    }

    /// Factura dentro de un servicio concreto (rutas anidadas)
    pub async fn get_in_service(
        &self,
        user: &AuthenticatedUser,
        service_id: Uuid,
        id: Uuid,
    ) -> Result<Invoice, AppError> {
        let invoice = self.get_by_id(user, id).await?;
        if invoice.service_id != service_id {
            return Err(not_found_error("Invoice", &id));
        }
        Ok(invoice)
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        service_id: Option<Uuid>,
    ) -> Result<Vec<Invoice>, AppError> {
        self.repository
            .list(InvoiceFilters {
                owner_scope: owner_scope(user),
                service_id,
                paid: None,
            })
            .await
    }

    /// Facturas pendientes de cobro (sólo dueño de taller)
    pub async fn list_unpaid(&self, user: &AuthenticatedUser) -> Result<Vec<Invoice>, AppError> {
        require_shop_owner(user, "list unpaid invoices")?;

        self.repository
            .list(InvoiceFilters {
                paid: Some(false),
                ..InvoiceFilters::default()
            })
            .await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<Invoice, AppError> {
        require_shop_owner(user, "update invoice")?;
        request.validate()?;

        self.repository
            .update(id, request.due_date, request.paid)
            .await?
            .ok_or_else(|| not_found_error("Invoice", &id))
    }

    /// Marcar como pagada. Repetir la llamada no es un error.
    pub async fn mark_as_paid(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Invoice, AppError> {
        require_shop_owner(user, "mark invoice as paid")?;

        let invoice = self
            .repository
            .mark_as_paid(id)
            .await?
            .ok_or_else(|| not_found_error("Invoice", &id))?;

        tracing::info!("💶 Factura {} marcada como pagada", invoice.invoice_number);
        Ok(invoice)
    }

    // Variantes anidadas bajo /services/:id/invoices. El rol se comprueba
    // antes que la pertenencia, así toda denegación por rol es un 403.

    pub async fn update_in_service(
        &self,
        user: &AuthenticatedUser,
        service_id: Uuid,
        id: Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<Invoice, AppError> {
        require_shop_owner(user, "update invoice")?;
        self.get_in_service(user, service_id, id).await?;
        self.update(user, id, request).await
    }

    pub async fn mark_as_paid_in_service(
        &self,
        user: &AuthenticatedUser,
        service_id: Uuid,
        id: Uuid,
    ) -> Result<Invoice, AppError> {
        require_shop_owner(user, "mark invoice as paid")?;
        self.get_in_service(user, service_id, id).await?;
        self.mark_as_paid(user, id).await
    }

    pub async fn delete_in_service(
        &self,
        user: &AuthenticatedUser,
        service_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        require_shop_owner(user, "delete invoice")?;
        self.get_in_service(user, service_id, id).await?;
        self.delete(user, id).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        require_shop_owner(user, "delete invoice")?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Invoice", &id));
        }

        tracing::info!("🗑️ Factura eliminada: {}", id);
        Ok(())
    }
}
