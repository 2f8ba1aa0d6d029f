//! Client-side checks for video uploads.
//!
//! Everything here runs before a request is built, so a rejected file never
//! reaches the network.

use std::fs;
use std::path::Path;

use crate::error::ApiError;
use crate::model::UploadLimits;

pub const NOT_A_VIDEO: &str = "Please select a video file";
pub const TOO_LARGE: &str = "File size must be less than 20MB";
pub const EMPTY_FILE: &str = "The selected file is empty";

/// A video ready to be sent as `multipart/form-data`.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UploadRequest {
    /// Reads `path` after checking its name, type and size.
    ///
    /// `content_type` overrides the type guessed from the extension.
    pub fn from_path(
        path: &Path,
        content_type: Option<&str>,
        title: Option<String>,
        description: Option<String>,
        limits: &UploadLimits,
    ) -> Result<Self, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation(NOT_A_VIDEO.to_string()))?;
        let content_type = match content_type {
            Some(ct) => ct.to_string(),
            None => guess_content_type(&file_name),
        };

        // Reject on metadata first so an oversized file is never read.
        let meta = fs::metadata(path)
            .map_err(|e| ApiError::Validation(format!("read {}: {}", path.display(), e)))?;
        if !meta.is_file() {
            return Err(ApiError::Validation(NOT_A_VIDEO.to_string()));
        }
        validate_upload(&file_name, &content_type, meta.len(), limits)?;

        let bytes = fs::read(path)
            .map_err(|e| ApiError::Validation(format!("read {}: {}", path.display(), e)))?;
        let upload = Self {
            file_name,
            content_type,
            bytes,
            title: title.filter(|t| !t.trim().is_empty()),
            description: description.filter(|d| !d.trim().is_empty()),
        };
        upload.validate(limits)?;
        Ok(upload)
    }

    pub fn validate(&self, limits: &UploadLimits) -> Result<(), ApiError> {
        validate_upload(
            &self.file_name,
            &self.content_type,
            self.bytes.len() as u64,
            limits,
        )
    }
}

pub fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

pub fn validate_upload(
    file_name: &str,
    content_type: &str,
    size: u64,
    limits: &UploadLimits,
) -> Result<(), ApiError> {
    if file_name.trim().is_empty() {
        return Err(ApiError::Validation(NOT_A_VIDEO.to_string()));
    }
    if !content_type
        .to_ascii_lowercase()
        .starts_with(&limits.allowed_type_prefix)
    {
        return Err(ApiError::Validation(NOT_A_VIDEO.to_string()));
    }
    if size == 0 {
        return Err(ApiError::Validation(EMPTY_FILE.to_string()));
    }
    if size > limits.max_file_size {
        return Err(ApiError::Validation(TOO_LARGE.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
