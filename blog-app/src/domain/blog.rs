use super::{Comment, Like, Vote};
use serde::{Deserialize, Serialize};

/// A blog post as loaded from the store.
///
/// `comments`, `votes` and `likes` are `None` when the query did not load
/// them. The derived counters below treat an unloaded collection as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: uuid::Uuid,
    pub slug: String,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub body: String,
    pub image_urn: Option<String>,
    pub category_name: String,
    pub tags: Vec<String>,
    pub author: String,
    pub is_published: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub comments: Option<Vec<Comment>>,
    pub votes: Option<Vec<Vote>>,
    pub likes: Option<Vec<Like>>,
}

impl Blog {
    pub fn new(
        title: String,
        description: String,
        body: String,
        category_name: String,
        author: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            slug: String::new(),
            title,
            description,
            body,
            image_urn: None,
            category_name,
            tags: Vec::new(),
            author,
            is_published: false,
            created_at: None,
            updated_at: None,
            comments: None,
            votes: None,
            likes: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_image_urn(mut self, image_urn: Option<String>) -> Self {
        self.image_urn = image_urn;
        self
    }

    pub fn with_published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = Some(comments);
        self
    }

    pub fn with_votes(mut self, votes: Vec<Vote>) -> Self {
        self.votes = Some(votes);
        self
    }

    pub fn with_likes(mut self, likes: Vec<Like>) -> Self {
        self.likes = Some(likes);
        self
    }

    pub fn comment_count(&self) -> usize {
        self.comments.as_deref().map_or(0, <[Comment]>::len)
    }

    pub fn vote_score(&self) -> i64 {
        self.votes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|v| i64::from(v.value))
            .sum()
    }

    pub fn likes_num(&self) -> i64 {
        self.likes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|l| i64::from(l.is_liked))
            .sum()
    }

    /// The viewer's vote value, or 0 when they have not voted.
    ///
    /// The store keeps one vote per (blog, user); should duplicates appear
    /// anyway, the first in load order wins.
    pub fn user_vote(&self, username: &str) -> i32 {
        self.votes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|v| v.username == username)
            .map_or(0, |v| v.value)
    }

    /// The viewer's like flag, or 0 when they have no like row.
    pub fn user_like(&self, username: &str) -> i32 {
        self.likes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|l| l.username == username)
            .map_or(0, |l| l.is_liked)
    }
}
