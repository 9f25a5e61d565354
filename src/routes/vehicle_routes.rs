use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::issue_controller::IssueController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::issue_dto::{CreateIssueRequest, UpdateIssueRequest};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Issue, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle)
                .put(update_vehicle)
                .patch(update_vehicle)
                .delete(delete_vehicle),
        )
        // Issues anidados bajo su vehículo
        .route("/:id/issues", get(list_issues).post(create_issue))
        .route(
            "/:id/issues/:issue_id",
            get(get_issue)
                .put(update_issue)
                .patch(update_issue)
                .delete(delete_issue),
        )
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.list(&user).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(&user, id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_issue(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), AppError> {
    let controller = IssueController::new(state.pool.clone());
    let issue = controller.create(&user, vehicle_id, request).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

async fn list_issues(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<Issue>>, AppError> {
    let controller = IssueController::new(state.pool.clone());
    Ok(Json(controller.list_by_vehicle(&user, vehicle_id).await?))
}

async fn get_issue(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((vehicle_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Issue>, AppError> {
    let controller = IssueController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(&user, vehicle_id, id).await?))
}

async fn update_issue(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((vehicle_id, id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateIssueRequest>,
) -> Result<Json<Issue>, AppError> {
    let controller = IssueController::new(state.pool.clone());
    Ok(Json(controller.update(&user, vehicle_id, id, request).await?))
}

async fn delete_issue(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((vehicle_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let controller = IssueController::new(state.pool.clone());
    controller.delete(&user, vehicle_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
