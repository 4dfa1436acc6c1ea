use super::entities::{blog, category, comment, like, user, vote};
use crate::domain::{Blog, Category, Comment, Like, Role, User, Vote};

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        let role = m.role.parse().unwrap_or_else(|e| {
            tracing::warn!("User {} has {}, treating as auth_user", m.username, e);
            Role::AuthUser
        });
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            role,
            token_version: m.token_version,
            created_at: m.created_at,
        }
    }
}

impl From<category::Model> for Category {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            banner_urn: m.banner_urn,
            created_at: m.created_at,
        }
    }
}

impl From<comment::Model> for Comment {
    fn from(m: comment::Model) -> Self {
        Self {
            id: m.id,
            blog_id: m.blog_id,
            username: m.username,
            body: m.body,
            created_at: m.created_at,
        }
    }
}

impl From<vote::Model> for Vote {
    fn from(m: vote::Model) -> Self {
        Self {
            blog_id: m.blog_id,
            username: m.username,
            value: m.value,
            created_at: m.created_at,
        }
    }
}

impl From<like::Model> for Like {
    fn from(m: like::Model) -> Self {
        Self {
            blog_id: m.blog_id,
            username: m.username,
            is_liked: m.is_liked,
            created_at: m.created_at,
        }
    }
}

/// Blog row without its collections; `comments`, `votes` and `likes`
/// stay unloaded.
impl From<blog::Model> for Blog {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            slug: m.slug,
            title: m.title,
            description: m.description,
            body: m.body,
            image_urn: m.image_urn,
            category_name: m.category_name,
            tags: Vec::new(),
            author: m.author,
            is_published: m.is_published,
            created_at: m.created_at,
            updated_at: m.updated_at,
            comments: None,
            votes: None,
            likes: None,
        }
    }
}
