use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::LICENSE_PLATE_RE;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    // Sólo lo usa el dueño de taller; un propietario siempre crea para sí mismo
    #[serde(default, alias = "owner")]
    pub owner_id: Option<Uuid>,

    #[validate(length(max = 50))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 20), regex = "LICENSE_PLATE_RE")]
    pub license_plate: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1885, max = 2100))]
    pub year: Option<i32>,
}

// Request para actualizar un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[serde(default, alias = "owner")]
    pub owner_id: Option<Uuid>,

    #[validate(length(max = 50))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 20), regex = "LICENSE_PLATE_RE")]
    pub license_plate: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1885, max = 2100))]
    pub year: Option<i32>,
}
