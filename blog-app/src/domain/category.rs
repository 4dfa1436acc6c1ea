use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: uuid::Uuid,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub banner_urn: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Category {
    pub fn new(name: String, description: String, banner_urn: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name,
            description,
            banner_urn,
            created_at: None,
        }
    }
}
