//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL de `migrations/`.

pub mod component;
pub mod invoice;
pub mod issue;
pub mod service;
pub mod user;
pub mod vehicle;

pub use component::Component;
pub use invoice::Invoice;
pub use issue::Issue;
pub use service::{IssueCostLine, RevenueSummary, Service, ServiceIssue};
pub use user::{User, UserResponse, UserType};
pub use vehicle::Vehicle;
