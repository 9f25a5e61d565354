use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::InvoiceController;
use crate::dto::invoice_dto::{MarkAsPaidResponse, UpdateInvoiceRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Invoice;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de facturas independientes del servicio. La emisión vive en
/// `/services/:id/invoices`.
pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices))
        .route("/unpaid", get(list_unpaid_invoices))
        .route(
            "/:id",
            get(get_invoice)
                .put(update_invoice)
                .patch(update_invoice)
                .delete(delete_invoice),
        )
        .route("/:id/mark_as_paid", post(mark_invoice_as_paid))
}

fn controller(state: &AppState) -> InvoiceController {
    InvoiceController::new(state.pool.clone(), state.config.invoice_due_days)
}

async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    Ok(Json(controller(&state).list(&user, None).await?))
}

async fn list_unpaid_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    Ok(Json(controller(&state).list_unpaid(&user).await?))
}

async fn get_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(controller(&state).get_by_id(&user, id).await?))
}

async fn update_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(controller(&state).update(&user, id, request).await?))
}

async fn delete_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    controller(&state).delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_invoice_as_paid(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MarkAsPaidResponse>, AppError> {
    let invoice = controller(&state).mark_as_paid(&user, id).await?;
    Ok(Json(MarkAsPaidResponse::new(invoice)))
}
