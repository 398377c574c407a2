//! Kinds of uploadable content.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Media kind of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Image,
    Video,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Image => "image",
            ContentType::Video => "video",
        }
    }

    /// Lowercase extensions, without the dot.
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            ContentType::Image => IMAGE_EXTENSIONS,
            ContentType::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Checks the file name's extension, case-insensitively.
    pub fn accepts_file(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.allowed_extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Like `accepts_file`, but reports why the name was refused.
    pub fn validate_file_name(&self, file_name: &str) -> Result<(), ValidationError> {
        if self.accepts_file(file_name) {
            return Ok(());
        }
        Err(ValidationError::invalid_format(
            "file_name",
            format!(
                "'{}' is not a supported {} file (allowed: {})",
                file_name,
                self.as_str(),
                self.allowed_extensions().join(", ")
            ),
        ))
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(ContentType::Image),
            "video" => Ok(ContentType::Video),
            other => Err(ValidationError::invalid_format(
                "content_type",
                format!("unknown content type '{}'", other),
            )),
        }
    }
}
