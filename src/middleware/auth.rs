//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::UserType,
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig, TokenType},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub user_type: UserType,
}

impl AuthenticatedUser {
    pub fn is_shop_owner(&self) -> bool {
        self.user_type == UserType::ShopOwner
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication credentials were not provided".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    // Decodificar y validar JWT
    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, TokenType::Access, &jwt_config)?;
    let user_id = claims.user_id()?;

    // Verificar que el usuario existe y sigue activo
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("User is inactive".to_string()));
    }

    // El rol del token debe seguir habilitado en la cuenta
    if !user.has_role(claims.user_type) {
        return Err(AppError::Unauthorized(format!(
            "User is not registered as {}",
            claims.user_type.as_str()
        )));
    }

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        user_type: claims.user_type,
    };

    tracing::debug!(
        "🔐 {} {} como {}",
        request.method(),
        request.uri().path(),
        authenticated_user.user_type.as_str()
    );

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
