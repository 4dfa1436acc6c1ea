use serde::{Deserialize, Serialize};

/// Favorite flag a user sets on a blog: 1 liked, 0 not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub blog_id: uuid::Uuid,
    pub username: String,
    pub is_liked: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Like {
    pub fn new(blog_id: uuid::Uuid, username: String, is_liked: i32) -> Self {
        Self {
            blog_id,
            username,
            is_liked,
            created_at: None,
        }
    }

    pub fn is_valid_flag(flag: i32) -> bool {
        flag == 0 || flag == 1
    }
}
