//! Utilidades de validación
//!
//! Validadores custom usados por los derives de `validator` en los DTOs.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Matrícula: letras, dígitos, espacios y guiones
    pub static ref LICENSE_PLATE_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]*$").unwrap();
}

/// Validar que un precio no sea negativo y tenga como mucho 2 decimales
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("price must be greater than or equal to 0".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }

    if value.normalize().scale() > 2 {
        let mut error = ValidationError::new("scale");
        error.message = Some("price must have at most 2 decimal places".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }

    // NUMERIC(10, 2)
    if value.abs() >= Decimal::new(100_000_000, 0) {
        let mut error = ValidationError::new("max_digits");
        error.message = Some("price must have at most 10 digits".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("value cannot be blank".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&dec!(0)).is_ok());
        assert!(validate_price(&dec!(120.50)).is_ok());
        assert!(validate_price(&dec!(99999999.99)).is_ok());
        assert!(validate_price(&dec!(-0.01)).is_err());
        assert!(validate_price(&dec!(10.005)).is_err());
        assert!(validate_price(&dec!(100000000)).is_err());
    }

    #[test]
    fn test_license_plate_regex() {
        assert!(LICENSE_PLATE_RE.is_match("RJ14QD3193"));
        assert!(LICENSE_PLATE_RE.is_match("AB-123-CD"));
        assert!(!LICENSE_PLATE_RE.is_match(" AB123"));
        assert!(!LICENSE_PLATE_RE.is_match("AB#123"));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("brakes").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
