//! Modelo de Vehicle

use serde::Serialize;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Vehicle - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: Option<String>,
    pub license_plate: String,
    pub model: String,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
}
