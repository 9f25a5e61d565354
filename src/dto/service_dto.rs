use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Issue, Service};

// Request para crear un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[serde(alias = "vehicle")]
    pub vehicle_id: Uuid,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub issues: Vec<Uuid>,
}

// Request para sustituir los issues de un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(max = 500))]
    pub issues: Vec<Uuid>,
}

// Response de servicio con sus issues
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: DateTime<Utc>,
    pub total_cost: Decimal,
    pub issues: Vec<Issue>,
}

impl ServiceResponse {
    pub fn new(service: Service, issues: Vec<Issue>) -> Self {
        Self {
            id: service.id,
            vehicle_id: service.vehicle_id,
            date: service.date,
            total_cost: service.total_cost,
            issues,
        }
    }
}

/// Elimina ids repetidos conservando el orden
pub fn dedup_issue_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_issue_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedup_issue_ids(vec![a, b, a, a]), vec![a, b]);
    }
}
