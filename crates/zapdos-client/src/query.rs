//! Fluent search query builder.
//!
//! A plain builder that assembles the search request body; execution is an
//! explicit async call rather than an implicitly awaitable object.

use zapdos_core::models::{SearchRequest, SearchResponse};
use zapdos_core::ZapdosError;

use crate::ApiClient;

/// Builder for `POST /v1/search` request bodies.
///
/// ```no_run
/// # async fn example(client: &zapdos_client::ApiClient) -> Result<(), zapdos_client::ZapdosError> {
/// use zapdos_client::SearchQuery;
///
/// let hits = SearchQuery::new("quarterly report")
///     .limit(10)
///     .kind("file")
///     .send(client)
///     .await?;
/// println!("{} results", hits.count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    request: SearchRequest,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            request: SearchRequest {
                q: q.into(),
                ..SearchRequest::default()
            },
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.request.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.request.offset = Some(offset);
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.request.kind = Some(kind.into());
        self
    }

    /// Finish building without executing.
    pub fn build(self) -> SearchRequest {
        self.request
    }

    /// Execute against a client.
    pub async fn send(self, client: &ApiClient) -> Result<SearchResponse, ZapdosError> {
        client.search(self.build()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_body() {
        let request = SearchQuery::new("demo").limit(5).offset(10).kind("file").build();
        assert_eq!(request.q, "demo");
        assert_eq!(request.limit, Some(5));
        assert_eq!(request.offset, Some(10));
        assert_eq!(request.kind.as_deref(), Some("file"));
    }

    #[test]
    fn omits_unset_fields_from_json() {
        let request = SearchQuery::new("demo").build();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["q"], serde_json::json!("demo"));
        assert!(json.get("limit").is_none());
        assert!(json.get("offset").is_none());
        assert!(json.get("kind").is_none());
    }
}
