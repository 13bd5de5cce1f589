//! Core domain library for snipbox (config, storage, models).

/// Configuration loading and defaults.
pub mod config;
/// Application error types (storage/domain).
pub mod error;
/// Data models for API requests and persistence.
pub mod models;
/// Snippet storage layer.
pub mod store;

pub use config::{Config, DEFAULT_PORT};
pub use error::AppError;
pub use store::SnippetStore;
