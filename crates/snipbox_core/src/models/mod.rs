//! Data models for persistence and the HTTP API.

/// Snippet entity and request payloads.
pub mod snippet;

#[cfg(test)]
mod tests;

pub use snippet::{CreateSnippetRequest, CreatedSnippet, Snippet};
