//! Utilidades de validación
//!
//! Extractores `ValidatedJson`, `ValidatedPath` y `ValidatedQuery`, y
//! validadores personalizados usados por los DTOs.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::utils::errors::AppError;

/// Cuerpo JSON deserializado y validado antes de llegar al handler.
///
/// Los errores de parseo (campos obligatorios ausentes, valores de enum
/// desconocidos...) y los de `validator` se devuelven como `AppError::Validation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Parámetros de ruta. Un id mal formado es `AppError::Validation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| AppError::Validation(rejection.body_text()))?;
        Ok(ValidatedPath(value))
    }
}

/// Query string. Un filtro desconocido es `AppError::Validation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::Validation(rejection.body_text()))?;
        Ok(ValidatedQuery(value))
    }
}

/// Distingue "campo ausente" (`None`) de "campo a null" (`Some(None)`).
///
/// Usar junto con `#[serde(default)]`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// El precio no puede ser negativo
pub fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("El precio no puede ser negativo".into());
        return Err(error);
    }
    Ok(())
}

/// Un texto obligatorio no puede quedar vacío tras recortar espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("El campo no puede estar vacío".into());
        return Err(error);
    }
    Ok(())
}

/// Normaliza textos opcionales: recorta y convierte "" en `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_non_negative_price() {
        assert!(validate_non_negative_price(&Decimal::from_str("0").unwrap()).is_ok());
        assert!(validate_non_negative_price(&Decimal::from_str("15999.99").unwrap()).is_ok());
        assert!(validate_non_negative_price(&Decimal::from_str("-1").unwrap()).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Ana").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  rojo ".into())), Some("rojo".into()));
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(None), None);
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_present")]
        img: Option<Option<String>>,
    }

    #[test]
    fn test_deserialize_present_distinguishes_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.img, None);

        let null: Patch = serde_json::from_str(r#"{"img": null}"#).unwrap();
        assert_eq!(null.img, Some(None));

        let value: Patch = serde_json::from_str(r#"{"img": "a.jpg"}"#).unwrap();
        assert_eq!(value.img, Some(Some("a.jpg".to_string())));
    }
}
