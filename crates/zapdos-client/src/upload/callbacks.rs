//! Per-file upload callbacks.
//!
//! The caller supplies one optional tree of handlers for a whole batch; the
//! coordinator re-tags a copy per file so every invocation carries that
//! file's original submission index. [`extend_callbacks`] and
//! [`unextend_callbacks`] are mutually-inverse structural maps over this
//! fixed schema (top-level handlers plus one nested `job` branch): they
//! wrap handlers without ever invoking them.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Shared handler for one event type.
pub type Handler<E> = Arc<dyn Fn(E) + Send + Sync>;

/// Fractional upload progress, as a whole-number percentage. Reports 0 when
/// the total size is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub percent: u32,
    pub file_index: Option<usize>,
}

/// The file's bytes reached the storage endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvent {
    pub file_index: Option<usize>,
}

/// The service confirmed the metadata commit for an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedEvent {
    pub object_id: String,
    pub file_index: Option<usize>,
}

/// The file's transport (or target resolution) failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedEvent {
    pub message: String,
    pub file_index: Option<usize>,
}

/// A background job lifecycle event for an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
    pub object_id: String,
    pub job_id: Option<String>,
    pub file_index: Option<usize>,
}

/// Event payloads that carry the per-file tag.
trait Tagged {
    fn set_file_index(&mut self, file_index: Option<usize>);
}

macro_rules! impl_tagged {
    ($($event:ty),+ $(,)?) => {
        $(impl Tagged for $event {
            fn set_file_index(&mut self, file_index: Option<usize>) {
                self.file_index = file_index;
            }
        })+
    };
}

impl_tagged!(ProgressEvent, StoredEvent, CompletedEvent, FailedEvent, JobEvent);

/// Optional handlers for one upload (or one batch, before extension).
#[derive(Clone, Default)]
pub struct UploadCallbacks {
    pub on_progress: Option<Handler<ProgressEvent>>,
    pub on_stored: Option<Handler<StoredEvent>>,
    pub on_completed: Option<Handler<CompletedEvent>>,
    pub on_failed: Option<Handler<FailedEvent>>,
    pub job: Option<JobCallbacks>,
}

/// Nested branch for background-job lifecycle handlers.
#[derive(Clone, Default)]
pub struct JobCallbacks {
    pub on_indexing_started: Option<Handler<JobEvent>>,
    pub on_indexing_completed: Option<Handler<JobEvent>>,
    pub on_indexing_failed: Option<Handler<JobEvent>>,
    pub on_transcription: Option<Handler<JobEvent>>,
}

impl UploadCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress(mut self, handler: impl Fn(ProgressEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(handler));
        self
    }

    pub fn on_stored(mut self, handler: impl Fn(StoredEvent) + Send + Sync + 'static) -> Self {
        self.on_stored = Some(Arc::new(handler));
        self
    }

    pub fn on_completed(
        mut self,
        handler: impl Fn(CompletedEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_completed = Some(Arc::new(handler));
        self
    }

    pub fn on_failed(mut self, handler: impl Fn(FailedEvent) + Send + Sync + 'static) -> Self {
        self.on_failed = Some(Arc::new(handler));
        self
    }

    pub fn job(mut self, job: JobCallbacks) -> Self {
        self.job = Some(job);
        self
    }
}

impl JobCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_indexing_started(
        mut self,
        handler: impl Fn(JobEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_indexing_started = Some(Arc::new(handler));
        self
    }

    pub fn on_indexing_completed(
        mut self,
        handler: impl Fn(JobEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_indexing_completed = Some(Arc::new(handler));
        self
    }

    pub fn on_indexing_failed(
        mut self,
        handler: impl Fn(JobEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_indexing_failed = Some(Arc::new(handler));
        self
    }

    pub fn on_transcription(
        mut self,
        handler: impl Fn(JobEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_transcription = Some(Arc::new(handler));
        self
    }
}

impl Debug for UploadCallbacks {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UploadCallbacks")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_stored", &self.on_stored.is_some())
            .field("on_completed", &self.on_completed.is_some())
            .field("on_failed", &self.on_failed.is_some())
            .field("job", &self.job)
            .finish()
    }
}

impl Debug for JobCallbacks {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("JobCallbacks")
            .field("on_indexing_started", &self.on_indexing_started.is_some())
            .field("on_indexing_completed", &self.on_indexing_completed.is_some())
            .field("on_indexing_failed", &self.on_indexing_failed.is_some())
            .field("on_transcription", &self.on_transcription.is_some())
            .finish()
    }
}

/// Wrap every present handler so future invocations are tagged with
/// `file_index`. Absent tree in, absent tree out; nothing runs during the
/// transform.
pub fn extend_callbacks(
    tree: Option<&UploadCallbacks>,
    file_index: usize,
) -> Option<UploadCallbacks> {
    retag_tree(tree, Some(file_index))
}

/// Inverse of [`extend_callbacks`]: forwarded invocations have the tag
/// stripped before the original handler sees them.
pub fn unextend_callbacks(tree: Option<&UploadCallbacks>) -> Option<UploadCallbacks> {
    retag_tree(tree, None)
}

fn retag_tree(tree: Option<&UploadCallbacks>, file_index: Option<usize>) -> Option<UploadCallbacks> {
    tree.map(|callbacks| UploadCallbacks {
        on_progress: retag(&callbacks.on_progress, file_index),
        on_stored: retag(&callbacks.on_stored, file_index),
        on_completed: retag(&callbacks.on_completed, file_index),
        on_failed: retag(&callbacks.on_failed, file_index),
        job: callbacks.job.as_ref().map(|job| JobCallbacks {
            on_indexing_started: retag(&job.on_indexing_started, file_index),
            on_indexing_completed: retag(&job.on_indexing_completed, file_index),
            on_indexing_failed: retag(&job.on_indexing_failed, file_index),
            on_transcription: retag(&job.on_transcription, file_index),
        }),
    })
}

fn retag<E: Tagged + 'static>(
    handler: &Option<Handler<E>>,
    file_index: Option<usize>,
) -> Option<Handler<E>> {
    handler.as_ref().map(|inner| {
        let inner = Arc::clone(inner);
        Arc::new(move |mut event: E| {
            event.set_file_index(file_index);
            inner(event)
        }) as Handler<E>
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn absent_tree_stays_absent() {
        assert!(extend_callbacks(None, 0).is_none());
        assert!(unextend_callbacks(None).is_none());
    }

    #[test]
    fn extend_tags_every_leaf() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let progress_seen = Arc::clone(&seen);
        let job_seen = Arc::clone(&seen);
        let callbacks = UploadCallbacks::new()
            .on_progress(move |event| {
                progress_seen
                    .lock()
                    .unwrap()
                    .push(("progress", event.file_index));
            })
            .job(JobCallbacks::new().on_indexing_started(move |event| {
                job_seen.lock().unwrap().push(("indexing", event.file_index));
            }));

        let extended = extend_callbacks(Some(&callbacks), 3).unwrap();
        (extended.on_progress.as_ref().unwrap())(ProgressEvent {
            percent: 50,
            file_index: None,
        });
        (extended
            .job
            .as_ref()
            .unwrap()
            .on_indexing_started
            .as_ref()
            .unwrap())(JobEvent {
            object_id: "obj-1".to_string(),
            job_id: None,
            file_index: None,
        });

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[("progress", Some(3)), ("indexing", Some(3))]
        );
    }

    #[test]
    fn unextend_strips_the_tag() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let failed_seen = Arc::clone(&seen);
        let callbacks = UploadCallbacks::new().on_failed(move |event| {
            failed_seen.lock().unwrap().push(event.file_index);
        });

        let plain = unextend_callbacks(Some(&callbacks)).unwrap();
        (plain.on_failed.as_ref().unwrap())(FailedEvent {
            message: "boom".to_string(),
            file_index: Some(9),
        });

        assert_eq!(seen.lock().unwrap().as_slice(), &[None]);
    }

    #[test]
    fn extend_then_unextend_is_identity_on_invocation_arguments() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let completed_seen = Arc::clone(&seen);
        let callbacks = UploadCallbacks::new().on_completed(move |event| {
            completed_seen.lock().unwrap().push(event);
        });

        let extended = extend_callbacks(Some(&callbacks), 5).unwrap();
        let round_tripped = unextend_callbacks(Some(&extended)).unwrap();

        let argument = CompletedEvent {
            object_id: "obj-5".to_string(),
            file_index: Some(5),
        };
        (round_tripped.on_completed.as_ref().unwrap())(argument.clone());
        (callbacks.on_completed.as_ref().unwrap())(argument.clone());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], argument);
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn transform_never_invokes_handlers() {
        let calls = Arc::new(Mutex::new(0usize));

        let progress_calls = Arc::clone(&calls);
        let job_calls = Arc::clone(&calls);
        let callbacks = UploadCallbacks::new()
            .on_progress(move |_| {
                *progress_calls.lock().unwrap() += 1;
            })
            .job(JobCallbacks::new().on_transcription(move |_| {
                *job_calls.lock().unwrap() += 1;
            }));

        let extended = extend_callbacks(Some(&callbacks), 1);
        let _ = unextend_callbacks(extended.as_ref());

        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn transforms_preserve_tree_shape() {
        let callbacks = UploadCallbacks::new().on_stored(|_| {});
        let extended = extend_callbacks(Some(&callbacks), 0).unwrap();
        assert!(extended.on_stored.is_some());
        assert!(extended.on_progress.is_none());
        assert!(extended.job.is_none());

        let with_job = UploadCallbacks::new().job(JobCallbacks::new());
        let extended = extend_callbacks(Some(&with_job), 0).unwrap();
        let job = extended.job.expect("job branch preserved");
        assert!(job.on_indexing_started.is_none());
    }
}
