use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AccessTokenResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokenPairResponse,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::{UserResponse, UserType};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_users))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register_vehicle_owner))
        .route("/owner/register", post(register_shop_owner))
        .route("/token", post(login_vehicle_owner))
        .route("/owner/token", post(login_shop_owner))
        .route("/token/refresh", post(refresh_token))
        .merge(protected)
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.pool.clone(), JwtConfig::from(&state.config))
}

async fn register_vehicle_owner(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = controller(&state).register(request, UserType::VehicleOwner).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn register_shop_owner(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = controller(&state).register(request, UserType::ShopOwner).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login_vehicle_owner(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let tokens = controller(&state).login(request, UserType::VehicleOwner).await?;
    Ok(Json(tokens))
}

async fn login_shop_owner(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let tokens = controller(&state).login(request, UserType::ShopOwner).await?;
    Ok(Json(tokens))
}

async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let response = controller(&state).refresh(request).await?;
    Ok(Json(response))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = controller(&state).list_users(&user).await?;
    Ok(Json(users))
}
