//! Media upload planning and drag-and-drop reordering.
//!
//! Both are pure: the caller decides what to do with the plan (toasts,
//! the multipart request) and where to send the new key order.

use std::path::{Path, PathBuf};

use crate::products::MAX_MEDIA_PER_PRODUCT;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

pub const ALLOWED_VIDEO_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "video/quicktime",
    "video/x-msvideo",
];

/// Per-file size ceiling: 50 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// A file the operator picked or dropped, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl UploadFile {
    /// Describe a file on disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file's metadata cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            mime: mime_for_path(path).to_string(),
            size,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InvalidType,
    TooLarge,
}

/// One file dropped from the batch before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

impl Rejection {
    /// The operator-facing message for this rejection.
    #[must_use]
    pub fn message(&self) -> String {
        match self.reason {
            RejectReason::InvalidType => format!("Invalid file type: {}", self.name),
            RejectReason::TooLarge => format!("File too large: {} (max 50MB)", self.name),
        }
    }
}

/// Result of checking a batch against the product's free slots and the
/// per-file rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPlan {
    pub accepted: Vec<UploadFile>,
    /// `Some(allowed)` when the batch was cut down to `allowed` files.
    pub truncated_to: Option<usize>,
    pub rejected: Vec<Rejection>,
}

impl UploadPlan {
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.accepted.iter().map(|f| f.size).sum()
    }
}

#[must_use]
pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&mime) || ALLOWED_VIDEO_TYPES.contains(&mime)
}

/// Cap the batch to the free slots, then drop files individually for a
/// disallowed MIME type or an oversized body.
#[must_use]
pub fn plan_upload(current_count: usize, files: Vec<UploadFile>) -> UploadPlan {
    let allowed = MAX_MEDIA_PER_PRODUCT.saturating_sub(current_count);
    let mut files = files;
    let truncated_to = if files.len() > allowed {
        files.truncate(allowed);
        Some(allowed)
    } else {
        None
    };

    let mut plan = UploadPlan {
        truncated_to,
        ..UploadPlan::default()
    };
    for file in files {
        if !is_allowed_mime(&file.mime) {
            plan.rejected.push(Rejection {
                name: file.name,
                reason: RejectReason::InvalidType,
            });
        } else if file.size > MAX_UPLOAD_BYTES {
            plan.rejected.push(Rejection {
                name: file.name,
                reason: RejectReason::TooLarge,
            });
        } else {
            plan.accepted.push(file);
        }
    }
    plan
}

/// MIME type for a file name, by extension. Unknown extensions map to
/// `application/octet-stream`, which the allow-list rejects.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// New key order after dropping `dragged` onto `target`: the dragged key is
/// removed and reinserted at the target's original index.
///
/// Returns `None` when either key is missing or both are the same.
#[must_use]
pub fn reorder_keys(keys: &[String], dragged: &str, target: &str) -> Option<Vec<String>> {
    if dragged == target {
        return None;
    }
    let from = keys.iter().position(|k| k == dragged)?;
    let to = keys.iter().position(|k| k == target)?;

    let mut order = keys.to_vec();
    let moved = order.remove(from);
    order.insert(to, moved);
    Some(order)
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
