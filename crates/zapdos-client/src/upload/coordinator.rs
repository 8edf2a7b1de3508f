//! Batch upload coordinator.
//!
//! Runs N independent per-file pipelines concurrently on one task and
//! aggregates outcomes deterministically. Within a file the state machine
//! is strictly sequential: resolve target, transport bytes, commit
//! metadata. A transport failure terminates only that file; metadata
//! trouble after a successful transport is logged and relayed through
//! callbacks without touching the file's outcome.

use futures::future::join_all;

use zapdos_core::models::{ObjectMetadata, UploadItem, UploadOutcome};
use zapdos_core::ZapdosError;

use crate::upload::callbacks::{extend_callbacks, FailedEvent, StoredEvent, UploadCallbacks};
use crate::upload::{commit, signed_url, transport};
use crate::ApiClient;

pub(crate) async fn upload_files(
    client: &ApiClient,
    items: Vec<UploadItem>,
    callbacks: Option<&UploadCallbacks>,
) -> Vec<UploadOutcome> {
    let pipelines = items
        .into_iter()
        .enumerate()
        .map(|(file_index, item)| run_single(client, file_index, item, callbacks));

    let mut outcomes = join_all(pipelines).await;
    // Completion order tracks network timing; the caller gets submission order.
    outcomes.sort_by_key(UploadOutcome::file_index);
    outcomes
}

async fn run_single(
    client: &ApiClient,
    file_index: usize,
    item: UploadItem,
    callbacks: Option<&UploadCallbacks>,
) -> UploadOutcome {
    // Tag every callback invocation with this file's submission index.
    let callbacks = extend_callbacks(callbacks, file_index).unwrap_or_default();

    let target = match signed_url::resolve_signed_url(&item.signed_url) {
        Ok(target) => target,
        Err(err) => return fail(file_index, &callbacks, err),
    };

    let metadata =
        ObjectMetadata::for_file(item.name.clone(), item.size, item.content_type.clone());

    let transported = transport::transmit(
        client.client(),
        client.config().upload_method,
        &target.cleaned_url,
        item,
        &callbacks,
    )
    .await;
    if let Err(err) = transported {
        return fail(file_index, &callbacks, err);
    }

    if let Some(handler) = &callbacks.on_stored {
        handler(StoredEvent { file_index: None });
    }

    // Metadata trouble is observable through callbacks and logs only; the
    // file's outcome stays a transport-phase success.
    if let Err(err) = commit::commit_and_relay(client, &target, metadata, &callbacks).await {
        tracing::warn!(
            error = %err,
            object_id = %target.object_id,
            "Metadata commit failed after upload"
        );
    }

    UploadOutcome::Data {
        object_id: target.object_id,
        file_index,
    }
}

fn fail(file_index: usize, callbacks: &UploadCallbacks, err: ZapdosError) -> UploadOutcome {
    let message = err.failure_message();
    if let Some(handler) = &callbacks.on_failed {
        handler(FailedEvent {
            message: message.clone(),
            file_index: None,
        });
    }
    UploadOutcome::Error {
        message,
        file_index,
    }
}
