//! Snippet data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snippet row stored in the database and returned by the API.
///
/// `id` is assigned by the store on insert and is immutable afterwards, as
/// are `created` and `expires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Whether this snippet is live at `now`.
    ///
    /// A snippet is live strictly before its expiry instant; at the instant
    /// itself it is already expired.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires
    }

    /// Whether this snippet is live right now.
    pub fn is_live(&self) -> bool {
        self.is_live_at(Utc::now())
    }
}

/// Request payload for creating a snippet.
#[derive(Debug, Deserialize)]
pub struct CreateSnippetRequest {
    pub title: String,
    pub content: String,
    pub expires_in_secs: i64,
}

/// Response payload for a successful create.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedSnippet {
    pub id: i64,
}
