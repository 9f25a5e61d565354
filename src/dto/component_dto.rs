use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_price};

// Request para crear un componente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateComponentRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom = "validate_price")]
    pub new_price: Decimal,

    #[validate(custom = "validate_price")]
    pub repair_price: Decimal,
}

// Request para actualizar un componente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateComponentRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom = "validate_price")]
    pub new_price: Option<Decimal>,

    #[validate(custom = "validate_price")]
    pub repair_price: Option<Decimal>,
}
