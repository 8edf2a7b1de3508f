//! Storage object models returned by the Zapdos API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed kind tag committed for plain file uploads.
pub const OBJECT_KIND_FILE: &str = "file";

/// Metadata committed for an uploaded object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub kind: String,
}

impl ObjectMetadata {
    pub fn for_file(name: impl Into<String>, size: Option<u64>, content_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            size,
            content_type,
            kind: OBJECT_KIND_FILE.to_string(),
        }
    }
}

/// Body of the metadata-commit request. The flag asks the service to create
/// a background indexing job whose lifecycle comes back over the response
/// stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitMetadataRequest {
    pub metadata: ObjectMetadata,
    pub create_indexing_job: bool,
}

/// A stored object's record as returned by `GET /v1/storage/{id}`.
/// Object identifiers are opaque strings minted by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageObject {
    pub id: String,
    pub name: String,
    pub size: Option<u64>,
    pub content_type: Option<String>,
    pub kind: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_file_sets_kind_tag() {
        let meta = ObjectMetadata::for_file("report.pdf", Some(1024), Some("application/pdf".into()));
        assert_eq!(meta.kind, OBJECT_KIND_FILE);
        assert_eq!(meta.size, Some(1024));
    }

    #[test]
    fn commit_request_serializes_flag() {
        let body = CommitMetadataRequest {
            metadata: ObjectMetadata::for_file("a.txt", None, None),
            create_indexing_job: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["create_indexing_job"], serde_json::json!(true));
        assert_eq!(json["metadata"]["kind"], serde_json::json!("file"));
        // absent size/content_type are omitted, not null
        assert!(json["metadata"].get("size").is_none());
    }
}
