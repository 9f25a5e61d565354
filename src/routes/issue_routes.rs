use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::issue_controller::IssueController;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Issue;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_issue_router() -> Router<AppState> {
    Router::new().route("/", get(list_all_issues))
}

async fn list_all_issues(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Issue>>, AppError> {
    let controller = IssueController::new(state.pool.clone());
    Ok(Json(controller.list_all(&user).await?))
}
