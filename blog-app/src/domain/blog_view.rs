use super::{Blog, Comment};
use serde::{Deserialize, Serialize};

/// Blog as returned to one particular viewer.
///
/// Carries the read-time counters and, when the request is authenticated,
/// the viewer's own vote and like. Built per response and never written
/// back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
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
    pub comments: Vec<Comment>,
    pub comment_count: usize,
    pub vote_score: i64,
    pub likes_num: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_like: Option<i32>,
}

impl BlogView {
    pub fn for_viewer(blog: Blog, viewer: Option<&str>) -> Self {
        let comment_count = blog.comment_count();
        let vote_score = blog.vote_score();
        let likes_num = blog.likes_num();
        let user_vote = viewer.map(|username| blog.user_vote(username));
        let user_like = viewer.map(|username| blog.user_like(username));

        Self {
            id: blog.id,
            slug: blog.slug,
            title: blog.title,
            description: blog.description,
            body: blog.body,
            image_urn: blog.image_urn,
            category_name: blog.category_name,
            tags: blog.tags,
            author: blog.author,
            is_published: blog.is_published,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
            comments: blog.comments.unwrap_or_default(),
            comment_count,
            vote_score,
            likes_num,
            user_vote,
            user_like,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Like, Vote};

    fn loaded_blog() -> Blog {
        let blog = Blog::new(
            "Ownership in practice".to_string(),
            "A tour".to_string(),
            "Borrowing rules".to_string(),
            "rust".to_string(),
            "carol".to_string(),
        );
        let id = blog.id;
        blog.with_votes(vec![
            Vote::new(id, "a".to_string(), 1),
            Vote::new(id, "b".to_string(), -1),
            Vote::new(id, "c".to_string(), 1),
        ])
        .with_likes(vec![Like::new(id, "a".to_string(), 1)])
        .with_comments(vec![Comment::new(id, "b".to_string(), "nice".to_string())])
    }

    #[test]
    fn test_anonymous_view_has_no_annotations() {
        let view = BlogView::for_viewer(loaded_blog(), None);

        assert_eq!(view.vote_score, 1);
        assert_eq!(view.likes_num, 1);
        assert_eq!(view.comment_count, 1);
        assert_eq!(view.user_vote, None);
        assert_eq!(view.user_like, None);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("userVote").is_none());
        assert!(json.get("userLike").is_none());
        assert_eq!(json["voteScore"], 1);
    }

    #[test]
    fn test_viewer_annotations() {
        let view = BlogView::for_viewer(loaded_blog(), Some("b"));
        assert_eq!(view.user_vote, Some(-1));
        assert_eq!(view.user_like, Some(0));

        let view = BlogView::for_viewer(loaded_blog(), Some("a"));
        assert_eq!(view.user_vote, Some(1));
        assert_eq!(view.user_like, Some(1));

        let view = BlogView::for_viewer(loaded_blog(), Some("stranger"));
        assert_eq!(view.user_vote, Some(0));
        assert_eq!(view.user_like, Some(0));
    }

    #[test]
    fn test_views_for_different_viewers_do_not_leak() {
        let blog = loaded_blog();
        let for_a = BlogView::for_viewer(blog.clone(), Some("a"));
        let for_b = BlogView::for_viewer(blog, Some("b"));

        assert_eq!(for_a.id, for_b.id);
        assert_eq!(for_a.user_vote, Some(1));
        assert_eq!(for_b.user_vote, Some(-1));
    }
}
