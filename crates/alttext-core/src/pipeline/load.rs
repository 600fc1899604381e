//! Reading image bytes from an [`ImageSource`].

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::ImageSource;

use super::validate::Validator;

/// Loads and size-checks image payloads.
pub struct ImageLoader {
    validator: Validator,
}

impl ImageLoader {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            validator: Validator::new(limits),
        }
    }

    /// Return the bytes of `source`, reading from disk for path sources.
    ///
    /// In-memory sources are borrowed, not copied.
    pub async fn load<'a>(&self, source: &'a ImageSource) -> PipelineResult<Cow<'a, [u8]>> {
        match source {
            ImageSource::Path(path) => self.read_file(path).await.map(Cow::Owned),
            ImageSource::Bytes { file_name, data } => {
                self.validator
                    .check_size(Path::new(file_name), data.len() as u64)?;
                Ok(Cow::Borrowed(data.as_slice()))
            }
        }
    }

    async fn read_file(&self, path: &Path) -> PipelineResult<Vec<u8>> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| io_error(path, e))?;
        if metadata.is_dir() {
            return Err(PipelineError::Unreadable {
                path: path.to_path_buf(),
                message: "path is a directory".to_string(),
            });
        }
        self.validator.check_size(path, metadata.len())?;

        let bytes = tokio::fs::read(path).await.map_err(|e| io_error(path, e))?;
        // The file may have been truncated between stat and read.
        self.validator.check_size(path, bytes.len() as u64)?;
        Ok(bytes)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> PipelineError {
    if e.kind() == ErrorKind::NotFound {
        PipelineError::FileNotFound(path.to_path_buf())
    } else {
        PipelineError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}
