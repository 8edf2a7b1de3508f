//! Signed-URL download helpers.
//!
//! Downloads use the same resolver as uploads: the reserved parameters are
//! stripped and the clean URL is fetched directly from the storage
//! endpoint.

use std::path::Path;

use bytes::Bytes;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use zapdos_core::ZapdosError;

use crate::upload::signed_url::resolve_signed_url;
use crate::ApiClient;

impl ApiClient {
    /// Download a signed URL's object fully into memory.
    pub async fn download_bytes(&self, signed_url: &str) -> Result<Bytes, ZapdosError> {
        let response = self.fetch_signed(signed_url).await?;
        response
            .bytes()
            .await
            .map_err(|err| ZapdosError::Http(err.to_string()))
    }

    /// Stream a signed URL's object to a local file without buffering it
    /// fully. Returns the number of bytes written.
    pub async fn download_to_path(
        &self,
        signed_url: &str,
        path: &Path,
    ) -> Result<u64, ZapdosError> {
        let response = self.fetch_signed(signed_url).await?;

        let mut stream = response.bytes_stream();
        let mut file = tokio::fs::File::create(path).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| ZapdosError::Http(err.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }

    async fn fetch_signed(&self, signed_url: &str) -> Result<reqwest::Response, ZapdosError> {
        let target = resolve_signed_url(signed_url)?;

        let response = self
            .client()
            .get(&target.cleaned_url)
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

        Ok(response)
    }
}
