//! Wire-level constants for the Zapdos API.

/// Reserved signed-URL query parameter carrying the short-lived access token.
pub const SIGNED_PARAM_TOKEN: &str = "X-Zapdos-Token";

/// Reserved signed-URL query parameter carrying the target object identifier.
pub const SIGNED_PARAM_OBJECT_ID: &str = "X-Zapdos-Obj-Id";

/// Header carrying the signed-URL token on the metadata-commit request.
pub const HEADER_TOKEN: &str = "X-Zapdos-Token";

/// API version prefix for service endpoints.
pub const API_PREFIX: &str = "/v1";

/// Content type sent for uploads when the caller supplies none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
