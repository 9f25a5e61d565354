use crate::models::{IssueCostLine, RevenueSummary, Service, ServiceIssue};
use crate::services::billing_service::{calculate_service_cost, RevenueWindow};
use crate::utils::errors::{validation_error, AppError};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crea el servicio, vincula sus issues y guarda el coste total en una
    /// sola transacción.
    pub async fn create_with_issues(&self, vehicle_id: Uuid, issue_ids: &[Uuid]) -> Result<Service, AppError> {
        let mut tx = self.pool.begin().await?;

        let service_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO services (id, vehicle_id, date, total_cost) VALUES ($1, $2, $3, 0)"
        )
        .bind(service_id)
        .bind(vehicle_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let service = attach_and_price(&mut tx, service_id, vehicle_id, issue_ids).await?;

        tx.commit().await?;
        Ok(service)
    }

    /// Sustituye el conjunto de issues y recalcula el total, en una transacción
    pub async fn replace_issues(&self, service: &Service, issue_ids: &[Uuid]) -> Result<Service, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM service_issues WHERE service_id = $1")
            .bind(service.id)
            .execute(&mut *tx)
            .await?;

        let service = attach_and_price(&mut tx, service.id, service.vehicle_id, issue_ids).await?;

        tx.commit().await?;
        Ok(service)
    }

    pub async fn find_by_id(&self, id: Uuid, owner_scope: Option<Uuid>) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            SELECT s.*
            FROM services s
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE s.id = $1 AND ($2::uuid IS NULL OR v.owner_id = $2)
            "#
        )
        .bind(id)
        .bind(owner_scope)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn list(&self, owner_scope: Option<Uuid>) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT s.*
            FROM services s
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE ($1::uuid IS NULL OR v.owner_id = $1)
            ORDER BY s.date DESC
            "#
        )
        .bind(owner_scope)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Issues vinculados a cada uno de los servicios dados
    pub async fn issues_for(&self, service_ids: &[Uuid]) -> Result<Vec<ServiceIssue>, AppError> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ServiceIssue>(
            r#"
            SELECT si.service_id, i.*
            FROM service_issues si
            JOIN issues i ON i.id = si.issue_id
            WHERE si.service_id = ANY($1)
            ORDER BY i.created_at ASC
            "#
        )
        .bind(service_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Suma de `total_cost` del día, mes y año en curso
    pub async fn revenue(&self, window: RevenueWindow) -> Result<RevenueSummary, AppError> {
        let summary = sqlx::query_as::<_, RevenueSummary>(
            r#"
            SELECT
                COALESCE(SUM(total_cost) FILTER (WHERE date >= $1), 0) AS daily_revenue,
                COALESCE(SUM(total_cost) FILTER (WHERE date >= $2), 0) AS monthly_revenue,
                COALESCE(SUM(total_cost), 0) AS yearly_revenue
            FROM services
            WHERE date >= $3
            "#
        )
        .bind(window.day_start)
        .bind(window.month_start)
        .bind(window.year_start)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}

/// Vincula los issues al servicio, calcula el coste y lo guarda.
/// Todos los issues deben existir y pertenecer al vehículo del servicio.
async fn attach_and_price(
    conn: &mut PgConnection,
    service_id: Uuid,
    vehicle_id: Uuid,
    issue_ids: &[Uuid],
) -> Result<Service, AppError> {
    let (matching,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM issues WHERE id = ANY($1) AND vehicle_id = $2"
    )
    .bind(issue_ids)
    .bind(vehicle_id)
    .fetch_one(&mut *conn)
    .await?;

    if matching as usize != issue_ids.len() {
        return Err(validation_error(
            "issues",
            "every issue must exist and belong to the service's vehicle",
        ));
    }

    sqlx::query(
        "INSERT INTO service_issues (service_id, issue_id) SELECT $1, UNNEST($2::uuid[])"
    )
    .bind(service_id)
    .bind(issue_ids)
    .execute(&mut *conn)
    .await?;

    let lines = sqlx::query_as::<_, IssueCostLine>(
        r#"
        SELECT i.id AS issue_id, i.is_repair, c.new_price, c.repair_price
        FROM service_issues si
        JOIN issues i ON i.id = si.issue_id
        LEFT JOIN components c ON c.id = i.component_id
        WHERE si.service_id = $1
        "#
    )
    .bind(service_id)
    .fetch_all(&mut *conn)
    .await?;

    let total_cost = calculate_service_cost(&lines)?;

    let service = sqlx::query_as::<_, Service>(
        "UPDATE services SET total_cost = $2 WHERE id = $1 RETURNING *"
    )
    .bind(service_id)
    .bind(total_cost)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!("💰 Servicio {} con {} issues, total {}", service_id, lines.len(), total_cost);
    Ok(service)
}
