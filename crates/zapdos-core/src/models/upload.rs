//! Upload pipeline data types.
//!
//! An [`UploadItem`] is created per file by the caller-facing API and
//! consumed exactly once by the pipeline. Outcomes come back as an ordered
//! list of [`UploadOutcome`] values, one per submitted item.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ZapdosError;

/// Boxed byte stream used for streaming upload sources.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Where a file's bytes come from.
pub enum UploadSource {
    /// Bytes already in memory.
    Bytes(Bytes),
    /// A file on disk, streamed at transport time without full buffering.
    Path(PathBuf),
    /// An arbitrary byte stream. Total size is whatever the item reports.
    Stream(ByteStream),
}

impl Debug for UploadSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadSource::Bytes(bytes) => {
                f.debug_tuple("Bytes").field(&bytes.len()).finish()
            }
            UploadSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            UploadSource::Stream(_) => f.debug_struct("Stream").finish_non_exhaustive(),
        }
    }
}

/// One file queued for upload to a pre-signed target URL.
#[derive(Debug)]
pub struct UploadItem {
    pub name: String,
    /// Total size in bytes when known; progress reports 0 when unknown.
    pub size: Option<u64>,
    pub content_type: Option<String>,
    pub source: UploadSource,
    /// Signed URL carrying the reserved token and object-id parameters.
    pub signed_url: String,
}

impl UploadItem {
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: impl Into<Bytes>,
        signed_url: impl Into<String>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: Some(bytes.len() as u64),
            content_type: None,
            source: UploadSource::Bytes(bytes),
            signed_url: signed_url.into(),
        }
    }

    /// Build an item from a file on disk. Reads metadata for the size; the
    /// file itself is opened and streamed at transport time.
    pub fn from_path(
        path: impl AsRef<Path>,
        signed_url: impl Into<String>,
    ) -> Result<Self, ZapdosError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self {
            name,
            size: Some(metadata.len()),
            content_type: None,
            source: UploadSource::Path(path.to_path_buf()),
            signed_url: signed_url.into(),
        })
    }

    pub fn from_stream(
        name: impl Into<String>,
        size: Option<u64>,
        stream: ByteStream,
        signed_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: None,
            source: UploadSource::Stream(stream),
            signed_url: signed_url.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Terminal result for one file in a batch. Exactly one arm per file; the
/// batch result is sorted ascending by `file_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadOutcome {
    Data { object_id: String, file_index: usize },
    Error { message: String, file_index: usize },
}

impl UploadOutcome {
    pub fn file_index(&self) -> usize {
        match self {
            UploadOutcome::Data { file_index, .. } => *file_index,
            UploadOutcome::Error { file_index, .. } => *file_index,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Data { .. })
    }

    pub fn object_id(&self) -> Option<&str> {
        match self {
            UploadOutcome::Data { object_id, .. } => Some(object_id),
            UploadOutcome::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UploadOutcome::Data { .. } => None,
            UploadOutcome::Error { message, .. } => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_bytes_records_size() {
        let item = UploadItem::from_bytes("a.txt", &b"hello"[..], "https://u.example/a");
        assert_eq!(item.size, Some(5));
        assert_eq!(item.name, "a.txt");
        assert!(item.content_type.is_none());
    }

    #[test]
    fn from_path_reads_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        let item = UploadItem::from_path(file.path(), "https://u.example/b").unwrap();
        assert_eq!(item.size, Some(10));
        assert!(!item.name.is_empty());
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = UploadItem::from_path("/definitely/not/here.bin", "https://u.example/c")
            .unwrap_err();
        assert!(matches!(err, ZapdosError::Io(_)));
    }

    #[test]
    fn outcome_serializes_discriminated() {
        let ok = UploadOutcome::Data {
            object_id: "obj-1".to_string(),
            file_index: 0,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["data"]["object_id"], serde_json::json!("obj-1"));
        assert_eq!(json["data"]["file_index"], serde_json::json!(0));

        let failed = UploadOutcome::Error {
            message: "boom".to_string(),
            file_index: 3,
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"]["message"], serde_json::json!("boom"));
        assert!(json.get("data").is_none());
    }

    #[test]
    fn outcome_accessors() {
        let ok = UploadOutcome::Data {
            object_id: "obj-1".to_string(),
            file_index: 2,
        };
        assert!(ok.is_success());
        assert_eq!(ok.file_index(), 2);
        assert_eq!(ok.object_id(), Some("obj-1"));
        assert_eq!(ok.error_message(), None);
    }
}
