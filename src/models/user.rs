//! Modelo de User
//!
//! Una misma cuenta puede estar habilitada como propietario de vehículo
//! (`is_user`), como dueño de taller (`is_owner`) o ambas.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Rol con el que se autentica una request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    VehicleOwner,
    ShopOwner,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::VehicleOwner => "vehicle_owner",
            UserType::ShopOwner => "shop_owner",
        }
    }
}

/// User - mapea a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_user: bool,
    pub is_owner: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Indica si la cuenta puede autenticarse con el rol dado
    pub fn has_role(&self, user_type: UserType) -> bool {
        match user_type {
            UserType::VehicleOwner => self.is_user,
            UserType::ShopOwner => self.is_owner,
        }
    }
}

/// Response de usuario para la API (sin password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_user: bool,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_user: user.is_user,
            is_owner: user.is_owner,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_user: bool, is_owner: bool) -> User {
        User {
            id: Uuid::new_v4(),
            email: "rider@velocare.test".to_string(),
            first_name: "Test".to_string(),
            last_name: "Rider".to_string(),
            password_hash: "hash".to_string(),
            is_user,
            is_owner,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_role() {
        let rider = user(true, false);
        assert!(rider.has_role(UserType::VehicleOwner));
        assert!(!rider.has_role(UserType::ShopOwner));

        let both = user(true, true);
        assert!(both.has_role(UserType::ShopOwner));
    }

    #[test]
    fn test_user_response_hides_password() {
        let json = serde_json::to_value(UserResponse::from(user(true, false))).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "rider@velocare.test");
    }
}
