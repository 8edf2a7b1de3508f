//! Metadata commit and job-status relay.
//!
//! After bytes land, one PATCH commits the file's metadata and asks the
//! service to create a background indexing job. The response body is an
//! NDJSON stream of lifecycle records, each dispatched to the matching
//! callback as it arrives. Stream trouble is absorbed: a record-level
//! `error` is logged, a bodyless response relays nothing.

use futures::StreamExt;

use zapdos_core::constants::HEADER_TOKEN;
use zapdos_core::models::{
    CommitMetadataRequest, JobEventType, JobStatusRecord, ObjectMetadata,
};
use zapdos_core::ZapdosError;

use crate::upload::callbacks::{CompletedEvent, Handler, JobEvent, UploadCallbacks};
use crate::upload::ndjson::NdjsonDecoder;
use crate::upload::signed_url::ParsedSignedTarget;
use crate::ApiClient;

pub(crate) async fn commit_and_relay(
    client: &ApiClient,
    target: &ParsedSignedTarget,
    metadata: ObjectMetadata,
    callbacks: &UploadCallbacks,
) -> Result<(), ZapdosError> {
    let url = client.storage_url(&target.object_id);
    let body = CommitMetadataRequest {
        metadata,
        create_indexing_job: true,
    };

    let response = client
        .client()
        .patch(&url)
        .header(HEADER_TOKEN, &target.token)
        .json(&body)
        .send()
        .await
        .map_err(|err| ZapdosError::Http(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ZapdosError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let mut stream = response.bytes_stream();
    let mut decoder = NdjsonDecoder::<JobStatusRecord>::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                for record in decoder.push(&chunk) {
                    dispatch(record, callbacks);
                }
            }
            Err(err) => {
                // Degraded stream: relay what already arrived, nothing more.
                tracing::warn!(
                    error = %err,
                    object_id = %target.object_id,
                    "Job status stream ended early"
                );
                return Ok(());
            }
        }
    }
    if let Some(record) = decoder.finish() {
        dispatch(record, callbacks);
    }

    Ok(())
}

fn dispatch(record: JobStatusRecord, callbacks: &UploadCallbacks) {
    match record {
        JobStatusRecord::Data { data } => {
            let job = callbacks.job.as_ref();
            match data.event_type {
                JobEventType::MetadataUpdated => {
                    if let Some(handler) = &callbacks.on_completed {
                        handler(CompletedEvent {
                            object_id: data.object_id,
                            file_index: None,
                        });
                    }
                }
                JobEventType::IndexingStarted => relay_job(
                    job.and_then(|job| job.on_indexing_started.as_ref()),
                    data.object_id,
                    data.job_id,
                ),
                JobEventType::IndexingCompleted => relay_job(
                    job.and_then(|job| job.on_indexing_completed.as_ref()),
                    data.object_id,
                    data.job_id,
                ),
                JobEventType::IndexingFailed => relay_job(
                    job.and_then(|job| job.on_indexing_failed.as_ref()),
                    data.object_id,
                    data.job_id,
                ),
                JobEventType::Transcription => relay_job(
                    job.and_then(|job| job.on_transcription.as_ref()),
                    data.object_id,
                    data.job_id,
                ),
            }
        }
        JobStatusRecord::Error { error } => {
            tracing::warn!(message = %error.message, "Job status stream reported an error");
        }
    }
}

fn relay_job(handler: Option<&Handler<JobEvent>>, object_id: String, job_id: Option<String>) {
    if let Some(handler) = handler {
        handler(JobEvent {
            object_id,
            job_id,
            file_index: None,
        });
    }
}
