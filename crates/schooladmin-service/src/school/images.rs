//! Image files staged for upload.

use std::path::Path;

use bytes::Bytes;

use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::UploadPart;
use schooladmin_entity::school::ImageSlot;

/// Multipart field the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "image";

/// One image destined for a profile slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Profile field the stored URL is written to.
    pub slot: ImageSlot,
    /// Multipart body sent to the upload endpoint.
    pub part: UploadPart,
}

impl ImageUpload {
    /// Stage in-memory bytes.
    pub fn new(slot: ImageSlot, file_name: impl Into<String>, bytes: Bytes) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            slot,
            part: UploadPart {
                field: UPLOAD_FIELD.to_string(),
                file_name,
                content_type,
                bytes,
            },
        }
    }

    /// Read a file from disk.
    pub async fn from_path(slot: ImageSlot, path: &Path) -> AppResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::validation(format!("Not a file: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::validation(format!("Cannot read {}: {e}", path.display()))
        })?;
        if bytes.is_empty() {
            return Err(AppError::validation(format!("{file_name} is empty")));
        }
        Ok(Self::new(slot, file_name, Bytes::from(bytes)))
    }
}
