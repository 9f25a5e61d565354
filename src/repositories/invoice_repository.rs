use crate::models::Invoice;
use crate::services::billing_service::format_invoice_number;
use crate::utils::errors::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Filtros para listar facturas
#[derive(Debug, Default, Clone, Copy)]
pub struct InvoiceFilters {
    pub owner_scope: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub paid: Option<bool>,
}

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Siguiente número de factura desde la secuencia `invoice_number_seq`
    pub async fn next_invoice_number(&self) -> Result<String, AppError> {
        let (sequence,): (i64,) = sqlx::query_as("SELECT nextval('invoice_number_seq')")
            .fetch_one(&self.pool)
            .await?;

        Ok(format_invoice_number(sequence))
    }

    pub async fn create(
        &self,
        service_id: Uuid,
        invoice_number: String,
        issue_date: DateTime<Utc>,
        due_date: NaiveDate,
        total_amount: Decimal,
        paid: bool,
    ) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (id, service_id, invoice_number, issue_date, due_date, total_amount, paid)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(service_id)
        .bind(invoice_number)
        .bind(issue_date)
        .bind(due_date)
        .bind(total_amount)
        .bind(paid)
        .fetch_one(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn exists_for_service(&self, service_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM invoices WHERE service_id = $1)")
            .bind(service_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn find_by_id(&self, id: Uuid, owner_scope: Option<Uuid>) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT inv.*
            FROM invoices inv
            JOIN services s ON s.id = inv.service_id
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE inv.id = $1 AND ($2::uuid IS NULL OR v.owner_id = $2)
            "#
        )
        .bind(id)
        .bind(owner_scope)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn list(&self, filters: InvoiceFilters) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT inv.*
            FROM invoices inv
            JOIN services s ON s.id = inv.service_id
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE ($1::uuid IS NULL OR v.owner_id = $1)
              AND ($2::uuid IS NULL OR inv.service_id = $2)
              AND ($3::boolean IS NULL OR inv.paid = $3)
            ORDER BY inv.issue_date DESC
            "#
        )
        .bind(filters.owner_scope)
        .bind(filters.service_id)
        .bind(filters.paid)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn update(
        &self,
        id: Uuid,
        due_date: Option<NaiveDate>,
        paid: Option<bool>,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET due_date = COALESCE($2, due_date),
                paid = COALESCE($3, paid)
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(due_date)
        .bind(paid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Marca la factura como pagada. Idempotente.
    pub async fn mark_as_paid(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET paid = TRUE WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
