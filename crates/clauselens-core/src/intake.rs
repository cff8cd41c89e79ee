//! File intake validation and preview rendering
//!
//! Checks a selected file's declared media type against the upload
//! allow-list and builds the preview markup shown inside the drop zone.
//! The check is advisory: it reads the browser-declared MIME string, not
//! the file content.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markup::escape_html;

/// Declared media types accepted for upload
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/jpg",
];

/// Placeholder markup when nothing is selected
pub const NO_FILE_MARKUP: &str = "<p>No file selected</p>";

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// User-visible intake failures, surfaced as blocking alerts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// Declared type is outside the allow-list; the selection is reset
    #[error("Please upload a PDF or image file (PNG, JPG)")]
    InvalidFileType,
    /// Submit attempted with no file chosen; submission is cancelled
    #[error("Please select a file to analyze")]
    NoFileSelected,
}

/// Snapshot of the file currently held by the picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: f64,
    pub media_type: String,
}

impl SelectedFile {
    pub fn new(name: &str, size_bytes: f64, media_type: &str) -> Self {
        Self {
            name: name.to_string(),
            size_bytes,
            media_type: media_type.to_string(),
        }
    }

    /// Declared-type check against the allow-list
    pub fn validate(&self) -> Result<(), IntakeError> {
        if is_allowed_type(&self.media_type) {
            Ok(())
        } else {
            Err(IntakeError::InvalidFileType)
        }
    }

    /// Size in mebibytes, rounded to two decimals
    pub fn size_mb(&self) -> String {
        format!("{:.2}", self.size_bytes / BYTES_PER_MIB)
    }
}

pub fn is_allowed_type(media_type: &str) -> bool {
    ALLOWED_MEDIA_TYPES.contains(&media_type)
}

/// `accept` attribute value for the file picker, derived from the allow-list
pub fn accept_attribute() -> String {
    ALLOWED_MEDIA_TYPES.join(",")
}

/// Preview markup for the drop zone info container
pub fn preview_markup(file: &SelectedFile) -> String {
    format!(
        "<p><strong>{}</strong> ({} MB)</p><span class=\"file-type\">{}</span>",
        escape_html(&file.name),
        file.size_mb(),
        escape_html(&file.media_type),
    )
}
