//! Client configuration.
//!
//! Configuration is read from the environment the same way the CLI expects
//! it: `ZAPDOS_API_URL` (falls back to localhost for development),
//! `ZAPDOS_API_KEY`, and optional `ZAPDOS_UPLOAD_METHOD` /
//! `ZAPDOS_TIMEOUT_SECS` overrides.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ZapdosError;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP method used against pre-signed upload URLs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadMethod {
    #[default]
    Put,
    Post,
}

impl FromStr for UploadMethod {
    type Err = ZapdosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "put" => Ok(UploadMethod::Put),
            "post" => Ok(UploadMethod::Post),
            _ => Err(ZapdosError::Config(format!(
                "Invalid upload method: {} (expected \"put\" or \"post\")",
                s
            ))),
        }
    }
}

/// Configuration for a Zapdos API client instance.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Service base URL, without a trailing slash.
    pub base_url: String,
    /// API key applied by the auth layer. Optional so unauthenticated
    /// endpoints (pre-signed uploads) still work without one.
    pub api_key: Option<String>,
    /// Method used for pre-signed upload requests.
    pub upload_method: UploadMethod,
    /// Client-wide request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            upload_method: UploadMethod::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ZapdosError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("ZAPDOS_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let api_key = env::var("ZAPDOS_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok();

        let upload_method = match env::var("ZAPDOS_UPLOAD_METHOD") {
            Ok(value) => value.parse()?,
            Err(_) => UploadMethod::default(),
        };

        let timeout_secs = match env::var("ZAPDOS_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| {
                ZapdosError::Config(format!("Invalid ZAPDOS_TIMEOUT_SECS: {}", value))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            upload_method,
            timeout_secs,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_upload_method(mut self, method: UploadMethod) -> Self {
        self.upload_method = method;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let config = ClientConfig::new("https://api.zapdos.dev/");
        assert_eq!(config.base_url, "https://api.zapdos.dev");
        assert_eq!(config.upload_method, UploadMethod::Put);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn upload_method_parses_case_insensitively() {
        assert_eq!("put".parse::<UploadMethod>().unwrap(), UploadMethod::Put);
        assert_eq!("POST".parse::<UploadMethod>().unwrap(), UploadMethod::Post);
        assert!("patch".parse::<UploadMethod>().is_err());
    }

    #[test]
    fn builder_methods_apply() {
        let config = ClientConfig::new("http://localhost:3000")
            .with_api_key("key-123")
            .with_upload_method(UploadMethod::Post);
        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.upload_method, UploadMethod::Post);
    }
}
