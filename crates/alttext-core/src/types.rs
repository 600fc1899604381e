//! Core data types: image sources, per-image results, and the batch result set.
//!
//! The serialized shape of [`ResultSet`] is the downloadable JSON document:
//!
//! ```json
//! {
//!   "cat.jpg": {
//!     "alt_text": "A tabby cat asleep on a windowsill.",
//!     "metadata": {
//!       "tokens_in": 1000,
//!       "tokens_out": 500,
//!       "tokens_total": 1500,
//!       "duration": "2.41 seconds",
//!       "estimated_cost": "$0.060000",
//!       "project_id": "spring-catalog"
//!     }
//!   }
//! }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};

use crate::pricing::{format_cost, format_duration};

/// An image to describe: a file on disk or a buffer already in memory.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Read from this path when the image is processed
    Path(PathBuf),
    /// In-memory bytes with the filename they were uploaded under
    Bytes { file_name: String, data: Vec<u8> },
}

impl ImageSource {
    /// Create a path-backed source.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Create a buffer-backed source.
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            file_name: file_name.into(),
            data,
        }
    }

    /// The key this image is stored under in a [`ResultSet`].
    ///
    /// For paths this is the final component, so `a/cat.jpg` and `b/cat.jpg`
    /// share the key `cat.jpg`.
    pub fn file_name(&self) -> String {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            Self::Bytes { file_name, .. } => file_name.clone(),
        }
    }

    /// Path used in error messages. Buffers report their filename.
    pub fn display_path(&self) -> PathBuf {
        match self {
            Self::Path(path) => path.clone(),
            Self::Bytes { file_name, .. } => PathBuf::from(file_name),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// Token counts reported by the model's usage block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Alt text and accounting for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    /// Description returned by the model
    pub alt_text: String,

    /// Prompt tokens
    pub tokens_in: u32,

    /// Completion tokens
    pub tokens_out: u32,

    /// Total tokens as reported by the API
    pub tokens_total: u32,

    /// Wall-clock time from encoding to response
    pub duration_seconds: f64,

    /// Estimated cost in USD
    pub estimated_cost: f64,

    /// Project identifier echoed from the request
    pub project_id: Option<String>,
}

impl InferenceResult {
    /// Human-readable duration, e.g. `"2.41 seconds"`.
    pub fn duration_display(&self) -> String {
        format_duration(self.duration_seconds)
    }

    /// Currency-prefixed cost, e.g. `"$0.060000"`.
    pub fn cost_display(&self) -> String {
        format_cost(self.estimated_cost)
    }
}

#[derive(serde::Serialize)]
struct ResultRecord<'a> {
    alt_text: &'a str,
    metadata: MetadataRecord<'a>,
}

#[derive(serde::Serialize)]
struct MetadataRecord<'a> {
    tokens_in: u32,
    tokens_out: u32,
    tokens_total: u32,
    duration: String,
    estimated_cost: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<&'a str>,
}

impl Serialize for InferenceResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResultRecord {
            alt_text: &self.alt_text,
            metadata: MetadataRecord {
                tokens_in: self.tokens_in,
                tokens_out: self.tokens_out,
                tokens_total: self.tokens_total,
                duration: self.duration_display(),
                estimated_cost: self.cost_display(),
                project_id: self.project_id.as_deref(),
            },
        }
        .serialize(serializer)
    }
}

/// Results for a batch, keyed by filename, in first-insertion order.
///
/// Inserting a filename that is already present replaces its result in place
/// (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(String, InferenceResult)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result, returning the one it replaced, if any.
    pub fn insert(
        &mut self,
        file_name: impl Into<String>,
        result: InferenceResult,
    ) -> Option<InferenceResult> {
        let file_name = file_name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == file_name) {
            Some((_, existing)) => Some(std::mem::replace(existing, result)),
            None => {
                self.entries.push((file_name, result));
                None
            }
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&InferenceResult> {
        self.entries
            .iter()
            .find(|(k, _)| k == file_name)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, file_name: &str) -> bool {
        self.get(file_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InferenceResult)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Sum of estimated costs across all entries.
    pub fn total_cost(&self) -> f64 {
        self.entries.iter().map(|(_, r)| r.estimated_cost).sum()
    }

    /// Sum of total tokens across all entries.
    pub fn total_tokens(&self) -> u64 {
        self.entries
            .iter()
            .map(|(_, r)| u64::from(r.tokens_total))
            .sum()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (file_name, result) in &self.entries {
            map.serialize_entry(file_name, result)?;
        }
        map.end()
    }
}
