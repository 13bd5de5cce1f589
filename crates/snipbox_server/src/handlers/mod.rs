//! HTTP request handlers.

/// Snippet-related endpoints.
pub mod snippet;
