//! Rutas HTTP
//!
//! `create_app_router` monta la API completa; los tests la usan directamente.

pub mod auth_routes;
pub mod component_routes;
pub mod invoice_routes;
pub mod issue_routes;
pub mod service_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación con estado, CORS y trazas
pub fn create_app_router(state: AppState) -> Router {
    // Todo lo que cuelga de /api/v1/velocare exige token de acceso
    let velocare = Router::new()
        .nest("/components", component_routes::create_component_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/all_issues", issue_routes::create_issue_router())
        .nest("/services", service_routes::create_service_router())
        .nest("/invoices", invoice_routes::create_invoice_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health_check", get(health_check))
        .nest("/api/v1/user", auth_routes::create_auth_router(state.clone()))
        .nest("/api/v1/velocare", velocare)
        .layer(cors_middleware(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "Health Check Ok" }))
}
