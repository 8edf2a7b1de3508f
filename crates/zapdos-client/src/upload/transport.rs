//! Single-file byte transport to a pre-signed URL.
//!
//! Streams the item's byte source without buffering whole payloads in
//! memory, reporting fractional progress as the body drains. One-shot: a
//! transport failure terminates the file's pipeline, there is no retry.

use bytes::Bytes;
use futures::StreamExt;
use tokio_util::io::ReaderStream;

use zapdos_core::constants::DEFAULT_CONTENT_TYPE;
use zapdos_core::models::{ByteStream, UploadItem, UploadSource};
use zapdos_core::{UploadMethod, ZapdosError};

use crate::upload::callbacks::{Handler, ProgressEvent, UploadCallbacks};

const GENERIC_FAILURE: &str = "Upload failed";

/// Transmit one item's bytes to its (already cleaned) target URL.
pub(crate) async fn transmit(
    http: &reqwest::Client,
    method: UploadMethod,
    url: &str,
    item: UploadItem,
    callbacks: &UploadCallbacks,
) -> Result<(), ZapdosError> {
    let content_type = item
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let (stream, total) = resolve_source(item).await?;
    let body = reqwest::Body::wrap_stream(with_progress(
        stream,
        total,
        callbacks.on_progress.clone(),
    ));

    let request = match method {
        UploadMethod::Put => http.put(url),
        UploadMethod::Post => http.post(url),
    };
    let mut request = request.header(reqwest::header::CONTENT_TYPE, content_type);
    if let Some(total) = total {
        request = request.header(reqwest::header::CONTENT_LENGTH, total);
    }

    let response = match request.body(body).send().await {
        Ok(response) => response,
        Err(err) => {
            let message = err.to_string();
            return Err(ZapdosError::TransportFailure {
                message: if message.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message
                },
            });
        }
    };

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body_text = response.text().await.unwrap_or_default();
    Err(ZapdosError::TransportFailure {
        message: failure_message(status.as_u16(), &body_text),
    })
}

/// Turn the item's source into a byte stream plus total size when known.
async fn resolve_source(item: UploadItem) -> Result<(ByteStream, Option<u64>), ZapdosError> {
    match item.source {
        UploadSource::Bytes(bytes) => {
            let total = Some(bytes.len() as u64);
            let stream = futures::stream::iter(std::iter::once(Ok::<Bytes, std::io::Error>(bytes)));
            Ok((Box::pin(stream), total))
        }
        UploadSource::Path(path) => {
            let file = tokio::fs::File::open(&path).await.map_err(|err| {
                ZapdosError::TransportFailure {
                    message: format!("Failed to open {}: {}", path.display(), err),
                }
            })?;
            let total = match item.size {
                Some(size) => Some(size),
                None => file.metadata().await.map(|meta| meta.len()).ok(),
            };
            Ok((Box::pin(ReaderStream::new(file)), total))
        }
        UploadSource::Stream(stream) => Ok((stream, item.size)),
    }
}

/// Count bytes as they leave and report whole-number percentages. Unknown
/// totals report 0 rather than failing the upload.
fn with_progress(
    stream: ByteStream,
    total: Option<u64>,
    on_progress: Option<Handler<ProgressEvent>>,
) -> impl futures::Stream<Item = Result<Bytes, std::io::Error>> {
    let mut loaded: u64 = 0;
    stream.map(move |chunk| {
        if let Ok(bytes) = &chunk {
            loaded += bytes.len() as u64;
            if let Some(handler) = &on_progress {
                handler(ProgressEvent {
                    percent: percent_of(loaded, total),
                    file_index: None,
                });
            }
        }
        chunk
    })
}

fn percent_of(loaded: u64, total: Option<u64>) -> u32 {
    match total {
        Some(total) if total > 0 => ((loaded as f64 / total as f64) * 100.0).round() as u32,
        _ => 0,
    }
}

/// Best-effort human-readable failure message: a structured error body
/// wins, then raw body text, then a generic fallback naming the status.
pub(crate) fn failure_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let candidates = [
            value.pointer("/error/message"),
            value.get("message"),
            value.get("error"),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(text) = candidate.as_str() {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    format!("{} with status {}", GENERIC_FAILURE, status)
}
