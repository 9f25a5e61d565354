//! Modelo de Service
//!
//! Un servicio agrupa varios issues de un mismo vehículo. `total_cost` se
//! calcula al escribir el conjunto de issues y no se recalcula en vivo.

use serde::Serialize;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use rust_decimal::Decimal;

use super::issue::Issue;

/// Service - mapea a la tabla services
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: DateTime<Utc>,
    pub total_cost: Decimal,
}

/// Fila de la relación service_issues con el issue completo
#[derive(Debug, Clone, FromRow)]
pub struct ServiceIssue {
    pub service_id: Uuid,
    #[sqlx(flatten)]
    pub issue: Issue,
}

/// Datos de precio de un issue necesarios para calcular el coste
#[derive(Debug, Clone, FromRow)]
pub struct IssueCostLine {
    pub issue_id: Uuid,
    pub is_repair: bool,
    pub new_price: Option<Decimal>,
    pub repair_price: Option<Decimal>,
}

/// Ingresos agregados por periodo
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RevenueSummary {
    pub daily_revenue: Decimal,
    pub monthly_revenue: Decimal,
    pub yearly_revenue: Decimal,
}
