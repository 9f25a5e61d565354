//! Modelo de Issue
//!
//! Un problema reportado sobre un vehículo. `component_id` queda en `None`
//! si el componente fue borrado del catálogo.

use serde::Serialize;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Issue - mapea a la tabla issues
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Issue {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub component_id: Option<Uuid>,
    pub description: Option<String>,
    pub is_repair: bool,
    pub created_at: DateTime<Utc>,
}
