//! File input validation for uploads (picker and drag-drop alike).

use serde::{Deserialize, Serialize};

use clipdeck_common::error::{ClipdeckError, ClipdeckResult};

use crate::media::{MediaSource, SourceOrigin};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// A file offered by the user, before it is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub file_name: String,
    /// Browser-reported MIME type, e.g. `video/mp4`.
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileCandidate {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    pub fn is_video(&self) -> bool {
        self.mime_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("video/")
    }
}

/// Accept only `video/*` files no larger than `max_bytes`.
pub fn validate_upload(file: &FileCandidate, max_bytes: u64) -> ClipdeckResult<()> {
    if !file.is_video() {
        tracing::debug!(file = %file.file_name, mime = %file.mime_type, "Rejected non-video upload");
        return Err(ClipdeckError::validation("Please select a valid video file"));
    }
    if file.size_bytes > max_bytes {
        tracing::debug!(file = %file.file_name, size = file.size_bytes, "Rejected oversized upload");
        return Err(ClipdeckError::validation(format!(
            "File size must be less than {}MB",
            max_bytes / BYTES_PER_MB
        )));
    }
    Ok(())
}

impl MediaSource {
    /// Source for an accepted upload, served from `object_url`.
    pub fn from_upload(file: FileCandidate, object_url: impl Into<String>) -> Self {
        Self {
            url: object_url.into(),
            title: file.file_name.clone(),
            origin: SourceOrigin::Upload {
                file_name: file.file_name,
                mime_type: file.mime_type,
                size_bytes: file.size_bytes,
            },
        }
    }
}
