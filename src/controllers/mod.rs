pub mod auth_controller;
pub mod component_controller;
pub mod invoice_controller;
pub mod issue_controller;
pub mod service_controller;
pub mod vehicle_controller;
