//! Signed-URL upload pipeline.
//!
//! One pipeline per file: resolve the signed target, transport the bytes,
//! commit metadata, relay job-lifecycle events. The coordinator runs N
//! pipelines concurrently and aggregates their outcomes in submission
//! order.

pub mod callbacks;
pub mod ndjson;
pub mod signed_url;

pub(crate) mod commit;
pub(crate) mod coordinator;
pub(crate) mod transport;

pub use callbacks::{
    extend_callbacks, unextend_callbacks, CompletedEvent, FailedEvent, Handler, JobCallbacks,
    JobEvent, ProgressEvent, StoredEvent, UploadCallbacks,
};
pub use ndjson::NdjsonDecoder;
pub use signed_url::{resolve_signed_url, ParsedSignedTarget};
