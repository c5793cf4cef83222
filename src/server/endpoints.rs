//! Endpoints outside the per-collection CRUD: health, contact details and
//! file uploads

use super::entity_registry::EntityRegistry;
use crate::core::error::{EntityError, RequestError, StorageError, ValidationError, WayfarerResult};
use crate::core::service::DocumentService;
use crate::entities::ContactInfo;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// `GET /api/health`
pub async fn health(State(registry): State<Arc<EntityRegistry>>) -> WayfarerResult<Json<Value>> {
    let counts = registry.counts().await?;
    Ok(Json(json!({
        "status": "ok",
        "service": "wayfarer",
        "counts": counts,
    })))
}

/// State of the contact details endpoints
#[derive(Clone)]
pub struct ContactState {
    pub service: Arc<dyn DocumentService<ContactInfo>>,
}

/// `GET /api/contact-info`
pub async fn get_contact_info(
    State(state): State<ContactState>,
) -> WayfarerResult<Json<ContactInfo>> {
    Ok(Json(state.service.get().await?))
}

/// `PUT /api/admin/contact-info`: replaces the whole document
pub async fn put_contact_info(
    State(state): State<ContactState>,
    body: Result<Json<Value>, JsonRejection>,
) -> WayfarerResult<Json<ContactInfo>> {
    let Json(payload) = body.map_err(|e| RequestError::InvalidBody {
        message: e.body_text(),
    })?;

    let filtered = ContactInfo::validation()
        .validate_and_filter(payload)
        .map_err(ValidationError::from)?;
    let info: ContactInfo =
        serde_json::from_value(filtered).map_err(|e| EntityError::SerializationError {
            entity_type: ContactInfo::DOCUMENT_NAME.to_string(),
            message: e.to_string(),
        })?;

    let stored = state.service.put(info).await?;
    tracing::info!("contact info updated");
    Ok(Json(stored))
}

/// State of the upload endpoint
#[derive(Clone)]
pub struct UploadState {
    pub dir: Arc<PathBuf>,
}

/// Response of a successful upload
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Public path of the stored file, served under `/uploads`
    pub url: String,
}

/// Stored file name: random UUID plus the sanitized original extension
pub fn upload_file_name(original: &str) -> String {
    let extension = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

/// `POST /api/admin/upload` (multipart)
///
/// Stores the first file part and answers with its public URL.
pub async fn upload(
    State(state): State<UploadState>,
    mut multipart: Multipart,
) -> WayfarerResult<(StatusCode, Json<UploadResponse>)> {
    let invalid = |message: String| RequestError::InvalidUpload { message };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid(e.body_text()))?
    {
        let Some(original) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(|e| invalid(e.body_text()))?;
        if bytes.is_empty() {
            return Err(invalid(format!("file '{}' is empty", original)).into());
        }

        let name = upload_file_name(&original);
        let path = state.dir.join(&name);
        let io_error = |e: std::io::Error| StorageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        tokio::fs::create_dir_all(state.dir.as_path())
            .await
            .map_err(io_error)?;
        tokio::fs::write(&path, &bytes).await.map_err(io_error)?;

        tracing::info!(file = %name, size = bytes.len(), "file uploaded");
        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url: format!("/uploads/{}", name),
            }),
        ));
    }

    Err(invalid("no file part in request".to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_file_name_keeps_safe_extension() {
        let name = upload_file_name("Kailash Sunrise.JPG");
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), 36 + 4);
    }

    #[test]
    fn test_upload_file_name_drops_odd_extension() {
        assert_eq!(upload_file_name("archive").len(), 36);
        assert_eq!(upload_file_name("evil.p/hp").len(), 36);
    }
}
