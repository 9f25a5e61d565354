use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Invoice;

// Request para emitir la factura de un servicio. Número, fecha e importe
// los asigna el servidor.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub paid: bool,
}

// Request para actualizar una factura
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    pub due_date: Option<NaiveDate>,
    pub paid: Option<bool>,
}

// Response de mark_as_paid
#[derive(Debug, Serialize)]
pub struct MarkAsPaidResponse {
    pub status: String,
    pub invoice: Invoice,
}

impl MarkAsPaidResponse {
    pub fn new(invoice: Invoice) -> Self {
        Self {
            status: "invoice marked as paid".to_string(),
            invoice,
        }
    }
}
