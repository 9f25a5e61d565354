//! Modelo de Component
//!
//! Catálogo de piezas con precio de pieza nueva y precio de reparación.

use serde::Serialize;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use rust_decimal::Decimal;

/// Component - mapea a la tabla components
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Component {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub new_price: Decimal,
    pub repair_price: Decimal,
    pub created_at: DateTime<Utc>,
}
