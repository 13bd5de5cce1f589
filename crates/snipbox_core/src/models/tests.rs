//! Model-level unit tests.

#[cfg(test)]
mod model_tests {
    use super::super::*;
    use chrono::{Duration, Utc};

    fn snippet_expiring_at(expires: chrono::DateTime<Utc>) -> Snippet {
        Snippet {
            id: 1,
            title: "Title A".to_string(),
            content: "Content A".to_string(),
            created: expires - Duration::hours(1),
            expires,
        }
    }

    #[test]
    fn liveness_is_strict_at_the_expiry_instant() {
        let now = Utc::now();
        let snippet = snippet_expiring_at(now);

        assert!(snippet.is_live_at(now - Duration::nanoseconds(1)));
        assert!(!snippet.is_live_at(now));
        assert!(!snippet.is_live_at(now + Duration::nanoseconds(1)));
    }

    #[test]
    fn future_expiry_is_live_and_past_expiry_is_not() {
        let now = Utc::now();

        assert!(snippet_expiring_at(now + Duration::hours(1)).is_live());
        assert!(!snippet_expiring_at(now - Duration::hours(1)).is_live());
    }

    #[test]
    fn snippet_serializes_with_row_field_names() {
        let snippet = snippet_expiring_at(Utc::now());
        let value = serde_json::to_value(&snippet).expect("snippet serializes");

        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "Title A");
        assert_eq!(value["content"], "Content A");
        assert!(value.get("created").is_some());
        assert!(value.get("expires").is_some());
    }
}
