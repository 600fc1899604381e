//! Input validation before an image is encoded.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Validates image payloads against configured limits.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Reject payloads that are empty or over the size limit.
    pub fn check_size(&self, path: &Path, len: u64) -> Result<(), PipelineError> {
        if len == 0 {
            return Err(PipelineError::EmptyImage(path.to_path_buf()));
        }

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if len > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: len / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        Ok(())
    }
}

/// Detect the MIME type of an image from its leading bytes.
///
/// Recognizes the formats vision endpoints accept: JPEG, PNG, GIF and WebP.
pub fn detect_media_type(header: &[u8]) -> Option<&'static str> {
    match header {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        // PNG: 89 50 4E 47
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        // GIF: GIF8
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        // WebP: RIFF....WEBP
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}
