//! Zapdos Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! wire constants shared by the Zapdos client crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, UploadMethod};
pub use error::{ZapdosError, ZapdosResult};
