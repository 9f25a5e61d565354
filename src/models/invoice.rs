//! Modelo de Invoice

use serde::Serialize;
use sqlx::FromRow;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use rust_decimal::Decimal;

/// Invoice - mapea a la tabla invoices (una por servicio)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub service_id: Uuid,
    pub invoice_number: String,
    pub issue_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub total_amount: Decimal,
    pub paid: bool,
}
