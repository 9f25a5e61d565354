//! Registro, login y renovación de tokens

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{
    AccessTokenResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokenPairResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{UserResponse, UserType};
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::services::authorization_service::require_shop_owner;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, verify_token, JwtConfig, TokenType};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    /// Crear una cuenta con el rol indicado
    pub async fn register(
        &self,
        request: RegisterRequest,
        user_type: UserType,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(conflict_error("User", "email", &request.email));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = self
            .repository
            .create(NewUser {
                email: request.email,
                first_name: request.first_name,
                last_name: request.last_name,
                password_hash,
                is_user: user_type == UserType::VehicleOwner,
                is_owner: user_type == UserType::ShopOwner,
            })
            .await?;

        tracing::info!("👤 Cuenta {} registrada como {}", user.id, user_type.as_str());
        Ok(UserResponse::from(user))
    }

    /// Login con el rol indicado; la cuenta debe tener ese rol habilitado
    pub async fn login(
        &self,
        request: LoginRequest,
        user_type: UserType,
    ) -> Result<TokenPairResponse, AppError> {
        request.validate()?;

        let invalid_credentials =
            || AppError::Unauthorized("No active account found with the given credentials".to_string());

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid || !user.is_active || !user.has_role(user_type) {
            tracing::warn!("🔒 Login rechazado para {} como {}", user.id, user_type.as_str());
            return Err(invalid_credentials());
        }

        let access = generate_token(user.id, user_type, TokenType::Access, &self.jwt_config)?;
        let refresh = generate_token(user.id, user_type, TokenType::Refresh, &self.jwt_config)?;

        tracing::info!("🔑 Login de {} como {}", user.id, user_type.as_str());
        Ok(TokenPairResponse { access, refresh })
    }

    /// Emitir un nuevo access token a partir de un refresh token
    pub async fn refresh(&self, request: RefreshTokenRequest) -> Result<AccessTokenResponse, AppError> {
        request.validate()?;

        let claims = verify_token(&request.refresh, TokenType::Refresh, &self.jwt_config)?;
        let user = self
            .repository
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        if !user.is_active || !user.has_role(claims.user_type) {
            return Err(AppError::Unauthorized("User is inactive".to_string()));
        }

        let access = generate_token(user.id, claims.user_type, TokenType::Access, &self.jwt_config)?;
        Ok(AccessTokenResponse { access })
    }

    /// Listado de propietarios de vehículos (sólo dueño de taller)
    pub async fn list_users(&self, user: &AuthenticatedUser) -> Result<Vec<UserResponse>, AppError> {
        require_shop_owner(user, "list users")?;

        let users = self.repository.list_vehicle_owners().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
