//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las variables obligatorias que faltan son un error de arranque, no un panic.

use std::env;

use anyhow::{anyhow, Context, Result};

/// Credenciales de Cloudinary para borrar imágenes
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    /// Vacío = CORS permisivo
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub cloudinary: Option<CloudinaryConfig>,
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| anyhow!("{} must be set", name))
}

fn parsed_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Lee la configuración de las variables de entorno (tras `dotenvy`)
    pub fn from_env() -> Result<Self> {
        let cloudinary = match (
            env::var("CLOUDINARY_CLOUD_NAME"),
            env::var("CLOUDINARY_API_KEY"),
            env::var("CLOUDINARY_API_SECRET"),
        ) {
            (Ok(cloud_name), Ok(api_key), Ok(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parsed_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration: parsed_or("JWT_EXPIRATION", 86_400)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
            request_timeout_secs: parsed_or("REQUEST_TIMEOUT_SECS", 30)?,
            cloudinary,
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("http://localhost:5173, ,https://concesionario.app,");
        assert_eq!(origins, vec!["http://localhost:5173", "https://concesionario.app"]);
    }

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig {
            environment: "production".into(),
            port: 8080,
            host: "127.0.0.1".into(),
            database_url: "postgres://localhost/concesionario".into(),
            jwt_secret: "secret".into(),
            jwt_expiration: 3600,
            cors_origins: vec![],
            request_timeout_secs: 30,
            cloudinary: None,
        };
        assert_eq!(config.server_url(), "127.0.0.1:8080");
    }
}
