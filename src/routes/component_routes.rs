use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::component_controller::ComponentController;
use crate::dto::component_dto::{CreateComponentRequest, UpdateComponentRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Component;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_component_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_components).post(create_component))
        .route(
            "/:id",
            get(get_component)
                .put(update_component)
                .patch(update_component)
                .delete(delete_component),
        )
}

async fn create_component(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateComponentRequest>,
) -> Result<(StatusCode, Json<Component>), AppError> {
    let controller = ComponentController::new(state.pool.clone());
    let component = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(component)))
}

async fn list_components(State(state): State<AppState>) -> Result<Json<Vec<Component>>, AppError> {
    let controller = ComponentController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Component>, AppError> {
    let controller = ComponentController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_component(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateComponentRequest>,
) -> Result<Json<Component>, AppError> {
    let controller = ComponentController::new(state.pool.clone());
    Ok(Json(controller.update(&user, id, request).await?))
}

async fn delete_component(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = ComponentController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
