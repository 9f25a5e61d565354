pub mod auth_dto;
pub mod component_dto;
pub mod invoice_dto;
pub mod issue_dto;
pub mod service_dto;
pub mod vehicle_dto;
