//! Repositorios
//!
//! Acceso a PostgreSQL con consultas `sqlx` en tiempo de ejecución.

pub mod component_repository;
pub mod invoice_repository;
pub mod issue_repository;
pub mod service_repository;
pub mod user_repository;
pub mod vehicle_repository;
