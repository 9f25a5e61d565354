use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

// Request para crear un issue en un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIssueRequest {
    #[serde(default, alias = "component")]
    pub component_id: Option<Uuid>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[serde(default = "default_is_repair")]
    pub is_repair: bool,
}

// Request para actualizar un issue. `"component_id": null` desvincula el componente.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateIssueRequest {
    #[serde(default, alias = "component", deserialize_with = "present_or_null")]
    pub component_id: Option<Option<Uuid>>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub is_repair: Option<bool>,
}

fn default_is_repair() -> bool {
    true
}

/// Distingue campo ausente (`None`) de `null` explícito (`Some(None)`)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_repair_defaults_to_true() {
        let request: CreateIssueRequest = serde_json::from_value(json!({
            "component": "7d7f2c1e-2a51-4c53-9a5e-6a8f0f2b1c11",
            "description": "brake pads worn"
        }))
        .unwrap();

        assert!(request.is_repair);
        assert!(request.component_id.is_some());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateIssueRequest = serde_json::from_value(json!({ "is_repair": false })).unwrap();
        assert_eq!(absent.component_id, None);

        let cleared: UpdateIssueRequest = serde_json::from_value(json!({ "component_id": null })).unwrap();
        assert_eq!(cleared.component_id, Some(None));
    }
}
