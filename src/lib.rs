//! VeloCare: backend de gestión de un taller de reparación
//!
//! Vehículos, componentes, issues, servicios y facturas sobre PostgreSQL,
//! expuestos como API REST con dos roles (propietario y dueño de taller).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
