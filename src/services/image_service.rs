//! Servicio de imágenes
//!
//! Las imágenes de los coches son referencias opacas (URLs de Cloudinary).
//! La API nunca sube imágenes; solo pide borrar la anterior cuando se
//! reemplaza, se borra explícitamente o se borra el coche.
//!
//! Todo borrado es best-effort: un fallo se registra y nunca bloquea la
//! operación principal (ver [`release_image`]).

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::environment::CloudinaryConfig;
use crate::utils::errors::AppError;

const CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("URL de imagen no válida: {0}")]
    InvalidUrl(String),

    #[error("Error HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cloudinary respondió {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        AppError::DependencyFailure(e.to_string())
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn delete(&self, image_ref: &str) -> Result<(), ImageError>;
}

/// Extrae el public id (`carpeta/nombre`) de una URL de Cloudinary.
///
/// `https://res.cloudinary.com/demo/image/upload/v1/cars/abc.jpg` → `cars/abc`
pub fn public_id_from_url(url: &str) -> Result<String, ImageError> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let file = segments.next().unwrap_or_default();
    let folder = segments.next().unwrap_or_default();

    let name = file.split('.').next().unwrap_or_default();
    if name.is_empty() || folder.is_empty() || folder.contains(':') {
        return Err(ImageError::InvalidUrl(url.to_string()));
    }

    Ok(format!("{}/{}", folder, name))
}

/// Borra imágenes vía la Admin API de Cloudinary
pub struct CloudinaryImageStore {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn delete(&self, image_ref: &str) -> Result<(), ImageError> {
        let public_id = public_id_from_url(image_ref)?;
        let url = format!(
            "{}/{}/resources/image/upload?public_ids%5B%5D={}",
            CLOUDINARY_API,
            self.config.cloud_name,
            urlencoding::encode(&public_id)
        );

        debug!("🌐 DELETE imagen {}", public_id);

        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("🗑️ Imagen {} eliminada de Cloudinary", public_id);
        Ok(())
    }
}

/// Almacén sin credenciales: no borra nada
pub struct DisabledImageStore;

#[async_trait]
impl ImageStore for DisabledImageStore {
    async fn delete(&self, image_ref: &str) -> Result<(), ImageError> {
        debug!("Cloudinary no configurado, se omite el borrado de {}", image_ref);
        Ok(())
    }
}

/// Libera una imagen sin propagar errores.
///
/// Devuelve `true` si el borrado se completó.
pub async fn release_image(images: &dyn ImageStore, image_ref: Option<&str>) -> bool {
    let Some(image_ref) = image_ref.filter(|i| !i.trim().is_empty()) else {
        return false;
    };

    match images.delete(image_ref).await {
        Ok(()) => true,
        Err(e) => {
            let failure = AppError::from(e);
            warn!("⚠️ No se pudo liberar la imagen {}: {}", image_ref, failure);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tokio::sync::Mutex;

    /// Registra cada borrado pedido; opcionalmente falla siempre
    #[derive(Default)]
    pub struct RecordingImageStore {
        pub deleted: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl RecordingImageStore {
        pub fn failing() -> Self {
            Self {
                deleted: Mutex::default(),
                fail: true,
            }
        }

        pub async fn deleted(&self) -> Vec<String> {
            self.deleted.lock().await.clone()
        }
    }

    #[async_trait]
    impl ImageStore for RecordingImageStore {
        async fn delete(&self, image_ref: &str) -> Result<(), ImageError> {
            self.deleted.lock().await.push(image_ref.to_string());
            if self.fail {
                return Err(ImageError::Rejected {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingImageStore;
    use super::*;

    #[test]
    fn test_public_id_from_cloudinary_url() {
        let url = "https://res.cloudinary.com/demo/image/upload/v1712/cars/corolla-blue.jpg";
        assert_eq!(public_id_from_url(url).unwrap(), "cars/corolla-blue");
        assert!(public_id_from_url("foto.png").is_err());
        assert!(public_id_from_url("").is_err());
    }

    #[tokio::test]
    async fn test_release_image_swallows_failures() {
        let images = RecordingImageStore::failing();
        assert!(!release_image(&images, Some("https://x/cars/a.jpg")).await);
        assert_eq!(images.deleted().await, vec!["https://x/cars/a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_release_image_skips_empty_refs() {
        let images = RecordingImageStore::default();
        assert!(!release_image(&images, None).await);
        assert!(!release_image(&images, Some("  ")).await);
        assert!(images.deleted().await.is_empty());
        assert!(release_image(&DisabledImageStore, Some("https://x/cars/a.jpg")).await);
    }
}
