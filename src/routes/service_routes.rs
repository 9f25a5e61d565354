use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::InvoiceController;
use crate::controllers::service_controller::ServiceController;
use crate::dto::invoice_dto::{CreateInvoiceRequest, MarkAsPaidResponse, UpdateInvoiceRequest};
use crate::dto::service_dto::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Invoice, RevenueSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/revenue_dashboard", get(revenue_dashboard))
        .route(
            "/:id",
            get(get_service)
                .put(update_service)
                .patch(update_service)
                .delete(delete_service),
        )
        // Facturas anidadas bajo su servicio
        .route("/:id/invoices", get(list_service_invoices).post(create_invoice))
        .route(
            "/:id/invoices/:invoice_id",
            get(get_service_invoice)
                .put(update_service_invoice)
                .patch(update_service_invoice)
                .delete(delete_service_invoice),
        )
        .route(
            "/:id/invoices/:invoice_id/mark_as_paid",
            post(mark_service_invoice_as_paid),
        )
}

fn invoice_controller(state: &AppState) -> InvoiceController {
    InvoiceController::new(state.pool.clone(), state.config.invoice_due_days)
}

async fn create_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), AppError> {
    let controller = ServiceController::new(state.pool.clone());
    let service = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

async fn list_services(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    Ok(Json(controller.list(&user).await?))
}

async fn get_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(&user, id).await?))
}

async fn update_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_service(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn revenue_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<RevenueSummary>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    Ok(Json(controller.revenue_dashboard(&user).await?))
}

async fn create_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(service_id): Path<Uuid>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    let invoice = invoice_controller(&state).create(&user, service_id, request).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn list_service_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(service_id): Path<Uuid>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    let invoices = invoice_controller(&state).list(&user, Some(service_id)).await?;
    Ok(Json(invoices))
}

async fn get_service_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((service_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = invoice_controller(&state).get_in_service(&user, service_id, id).await?;
    Ok(Json(invoice))
}

async fn update_service_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((service_id, id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = invoice_controller(&state)
        .update_in_service(&user, service_id, id, request)
        .await?;
    Ok(Json(invoice))
}

async fn delete_service_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((service_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    invoice_controller(&state)
        .delete_in_service(&user, service_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_service_invoice_as_paid(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((service_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MarkAsPaidResponse>, AppError> {
    let invoice = invoice_controller(&state)
        .mark_as_paid_in_service(&user, service_id, id)
        .await?;
    Ok(Json(MarkAsPaidResponse::new(invoice)))
}
