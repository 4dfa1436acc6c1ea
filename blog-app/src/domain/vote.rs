use serde::{Deserialize, Serialize};

/// A user's signed score on a blog. The sign is the direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub blog_id: uuid::Uuid,
    pub username: String,
    pub value: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Vote {
    pub fn new(blog_id: uuid::Uuid, username: String, value: i32) -> Self {
        Self {
            blog_id,
            username,
            value,
            created_at: None,
        }
    }

    /// Values a client may submit. Zero withdraws an existing vote.
    pub fn is_valid_value(value: i32) -> bool {
        matches!(value, -1..=1)
    }
}
