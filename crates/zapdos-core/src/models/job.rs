//! Job lifecycle records decoded from the metadata-commit response stream.
//!
//! Each NDJSON line is either a `data` record carrying a typed lifecycle
//! event or an `error` record carrying a message. Records are consumed and
//! discarded as the stream is drained.

use serde::{Deserialize, Serialize};

/// Lifecycle event kinds emitted while a background job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEventType {
    MetadataUpdated,
    IndexingStarted,
    IndexingCompleted,
    IndexingFailed,
    Transcription,
}

/// Payload of a `data` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEventData {
    #[serde(rename = "type")]
    pub event_type: JobEventType,
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

/// Payload of an `error` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStreamError {
    pub message: String,
}

/// One decoded NDJSON line from the job-status stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobStatusRecord {
    Data { data: JobEventData },
    Error { error: JobStreamError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_record() {
        let line = r#"{"data":{"type":"indexing_started","object_id":"obj-1","job_id":"job-9"}}"#;
        let record: JobStatusRecord = serde_json::from_str(line).unwrap();
        match record {
            JobStatusRecord::Data { data } => {
                assert_eq!(data.event_type, JobEventType::IndexingStarted);
                assert_eq!(data.object_id, "obj-1");
                assert_eq!(data.job_id.as_deref(), Some("job-9"));
            }
            other => panic!("expected data record, got {:?}", other),
        }
    }

    #[test]
    fn parses_record_without_job_id() {
        let line = r#"{"data":{"type":"metadata_updated","object_id":"obj-1"}}"#;
        let record: JobStatusRecord = serde_json::from_str(line).unwrap();
        match record {
            JobStatusRecord::Data { data } => {
                assert_eq!(data.event_type, JobEventType::MetadataUpdated);
                assert!(data.job_id.is_none());
            }
            other => panic!("expected data record, got {:?}", other),
        }
    }

    #[test]
    fn parses_error_record() {
        let line = r#"{"error":{"message":"index backlog full"}}"#;
        let record: JobStatusRecord = serde_json::from_str(line).unwrap();
        match record {
            JobStatusRecord::Error { error } => {
                assert_eq!(error.message, "index backlog full");
            }
            other => panic!("expected error record, got {:?}", other),
        }
    }

    #[test]
    fn unknown_event_type_is_a_parse_error() {
        let line = r#"{"data":{"type":"reticulating","object_id":"obj-1"}}"#;
        assert!(serde_json::from_str::<JobStatusRecord>(line).is_err());
    }
}
