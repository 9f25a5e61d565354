//! Reglas de autorización por rol
//!
//! Los dueños de taller ven y modifican todo; los propietarios de vehículos
//! sólo sus propios vehículos y lo que cuelga de ellos.

use uuid::Uuid;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::UserType;
use crate::utils::errors::{forbidden_error, AppResult};

/// Filtro de propietario a aplicar en las consultas.
/// `None` = sin filtro (dueño de taller).
pub fn owner_scope(user: &AuthenticatedUser) -> Option<Uuid> {
    match user.user_type {
        UserType::ShopOwner => None,
        UserType::VehicleOwner => Some(user.user_id),
    }
}

/// Exigir rol de dueño de taller para una operación
pub fn require_shop_owner(user: &AuthenticatedUser, operation: &str) -> AppResult<()> {
    if user.is_shop_owner() {
        Ok(())
    } else {
        tracing::warn!(
            "🚫 Usuario {} <{}> ({}) intentó '{}' sin rol de dueño de taller",
            user.user_id,
            user.email,
            user.user_type.as_str(),
            operation
        );
        Err(forbidden_error(operation, "shop owner role required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn user(user_type: UserType) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "someone@velocare.test".to_string(),
            user_type,
        }
    }

    #[test]
    fn test_vehicle_owner_is_scoped_to_self() {
        let owner = user(UserType::VehicleOwner);
        assert_eq!(owner_scope(&owner), Some(owner.user_id));
    }

    #[test]
    fn test_shop_owner_sees_everything() {
        let shop = user(UserType::ShopOwner);
        assert_eq!(owner_scope(&shop), None);
    }

    #[test]
    fn test_require_shop_owner() {
        assert!(user(UserType::ShopOwner).is_shop_owner());
        assert!(!user(UserType::VehicleOwner).is_shop_owner());
        assert!(require_shop_owner(&user(UserType::ShopOwner), "mark invoice as paid").is_ok());
        assert!(matches!(
            require_shop_owner(&user(UserType::VehicleOwner), "mark invoice as paid"),
            Err(AppError::Forbidden(_))
        ));
    }
}
