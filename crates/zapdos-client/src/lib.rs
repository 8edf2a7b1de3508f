//! Client SDK for the Zapdos object storage and indexing service.
//!
//! Provides an HTTP client with configurable auth (Bearer token or
//! X-API-Key), the signed-URL upload pipeline with per-file callbacks, a
//! fluent search query builder, and download helpers. The CLI crate uses
//! this client directly.

pub mod api;
pub mod download;
pub mod query;
pub mod upload;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
    /// No standing credential; only signed-URL operations will succeed.
    None,
}

/// HTTP client for the Zapdos API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    auth: Auth,
}

impl ApiClient {
    /// Create a client from a configuration. An API key in the config is
    /// applied as X-API-Key auth.
    pub fn new(config: ClientConfig) -> Result<Self, ZapdosError> {
        let auth = match &config.api_key {
            Some(key) => Auth::XApiKey(key.clone()),
            None => Auth::None,
        };
        Self::with_auth(config, auth)
    }

    pub fn with_auth(config: ClientConfig, auth: Auth) -> Result<Self, ZapdosError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| {
                ZapdosError::Config(format!("Failed to create HTTP client: {}", err))
            })?;

        Ok(Self {
            client,
            config,
            auth,
        })
    }

    /// Create a client from the environment: ZAPDOS_API_URL (or API_URL),
    /// ZAPDOS_API_KEY (or API_KEY).
    pub fn from_env() -> Result<Self, ZapdosError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
            Auth::None => request,
        }
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ZapdosError> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        request = self.apply_auth(request);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ZapdosError::Http(err.to_string()))?;

        Self::decode_json(response).await
    }

    /// POST JSON body and deserialize response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ZapdosError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body);
        let request = self.apply_auth(request);

        let response = request
            .send()
            .await
            .map_err(|err| ZapdosError::Http(err.to_string()))?;

        Self::decode_json(response).await
    }

    /// DELETE request. Returns Ok(()) on success.
    pub(crate) async fn delete_json(&self, path: &str) -> Result<(), ZapdosError> {
        let url = self.build_url(path);
        let request = self.client.delete(&url);
        let request = self.apply_auth(request);

        let response = request
            .send()
            .await
            .map_err(|err| ZapdosError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_failure(status.as_u16(), response).await);
        }

        Ok(())
    }

    async fn decode_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ZapdosError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_failure(status.as_u16(), response).await);
        }

        response
            .json()
            .await
            .map_err(|err| ZapdosError::Http(format!("Failed to parse response as JSON: {}", err)))
    }

    async fn api_failure(status: u16, response: reqwest::Response) -> ZapdosError {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ZapdosError::Api { status, message }
    }

    /// Raw client for custom requests. Caller must apply auth via build_url
    /// and headers.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

// Re-export the public SDK surface for convenience.
pub use query::SearchQuery;
pub use upload::callbacks::{
    CompletedEvent, FailedEvent, Handler, JobCallbacks, JobEvent, ProgressEvent, StoredEvent,
    UploadCallbacks,
};
pub use upload::signed_url::{resolve_signed_url, ParsedSignedTarget};
pub use zapdos_core::models::{
    ByteStream, SearchRequest, SearchResponse, SearchResult, StorageObject, UploadItem,
    UploadOutcome, UploadSource,
};
pub use zapdos_core::{ClientConfig, UploadMethod, ZapdosError, ZapdosResult};
