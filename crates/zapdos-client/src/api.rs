//! Domain methods for the Zapdos API client.
//!
//! Response types live in `zapdos_core::models` and are re-exported from
//! the crate root.

use zapdos_core::constants::API_PREFIX;
use zapdos_core::models::{
    SearchRequest, SearchResponse, StorageObject, UploadItem, UploadOutcome,
};
use zapdos_core::ZapdosError;

use crate::upload::callbacks::{unextend_callbacks, UploadCallbacks};
use crate::upload::coordinator;
use crate::ApiClient;

impl ApiClient {
    pub(crate) fn storage_url(&self, object_id: &str) -> String {
        format!("{}{}/storage/{}", self.base_url(), API_PREFIX, object_id)
    }

    /// Upload a batch of files to their pre-signed targets.
    ///
    /// All per-file pipelines run concurrently; the returned list has one
    /// outcome per item, sorted by original submission index. The call
    /// itself never fails: callers inspect each outcome's `data`/`error`
    /// arm. Callback invocations carry the file's index.
    pub async fn upload_files(
        &self,
        items: Vec<UploadItem>,
        callbacks: Option<&UploadCallbacks>,
    ) -> Vec<UploadOutcome> {
        coordinator::upload_files(self, items, callbacks).await
    }

    /// Upload a single file. The callback tree is invoked without a file
    /// index, matching the per-file public shape.
    pub async fn upload_file(
        &self,
        item: UploadItem,
        callbacks: Option<&UploadCallbacks>,
    ) -> UploadOutcome {
        let plain = unextend_callbacks(callbacks);
        let mut outcomes = self.upload_files(vec![item], plain.as_ref()).await;
        match outcomes.pop() {
            Some(outcome) => outcome,
            None => UploadOutcome::Error {
                message: "Empty batch".to_string(),
                file_index: 0,
            },
        }
    }

    /// Semantic (and metadata) search.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse, ZapdosError> {
        self.post_json(&format!("{}/search", API_PREFIX), &request)
            .await
    }

    /// Get a stored object's record by ID.
    pub async fn get_object(&self, object_id: &str) -> Result<StorageObject, ZapdosError> {
        self.get_json(&format!("{}/storage/{}", API_PREFIX, object_id), &[])
            .await
    }

    /// Delete a stored object by ID.
    pub async fn delete_object(&self, object_id: &str) -> Result<(), ZapdosError> {
        self.delete_json(&format!("{}/storage/{}", API_PREFIX, object_id))
            .await
    }
}
