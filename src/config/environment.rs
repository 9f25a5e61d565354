//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::services::billing_service::DEFAULT_DUE_DAYS;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_access_expiration: u64,
    pub jwt_refresh_expiration: u64,
    pub cors_origins: Vec<String>,
    pub run_migrations: bool,
    pub invoice_due_days: i64,
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_var("PORT", 8000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            // 5 horas / 1 día, como los tokens de la versión anterior
            jwt_access_expiration: parse_var("JWT_ACCESS_EXPIRATION", 18_000)?,
            jwt_refresh_expiration: parse_var("JWT_REFRESH_EXPIRATION", 86_400)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
            invoice_due_days: parse_var("INVOICE_DUE_DAYS", DEFAULT_DUE_DAYS)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://velocare.app,"),
            vec!["http://localhost:3000".to_string(), "https://velocare.app".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_var_default_and_error() {
        assert_eq!(parse_var::<u16>("VELOCARE_TEST_UNSET_PORT", 8000).unwrap(), 8000);

        env::set_var("VELOCARE_TEST_BAD_DAYS", "fifteen");
        assert!(parse_var::<i64>("VELOCARE_TEST_BAD_DAYS", 15).is_err());

        env::set_var("VELOCARE_TEST_GOOD_DAYS", " 30 ");
        assert_eq!(parse_var::<i64>("VELOCARE_TEST_GOOD_DAYS", 15).unwrap(), 30);
    }
}
