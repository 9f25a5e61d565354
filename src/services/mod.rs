//! Servicios de negocio
//!
//! Reglas de autorización y cálculo de facturación, sin acceso a base de datos.

pub mod authorization_service;
pub mod billing_service;
