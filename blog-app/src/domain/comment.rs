use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: uuid::Uuid,
    pub blog_id: uuid::Uuid,
    pub username: String,
    pub body: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Comment {
    pub fn new(blog_id: uuid::Uuid, username: String, body: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            blog_id,
            username,
            body,
            created_at: None,
        }
    }
}
