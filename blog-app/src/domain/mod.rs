mod blog;
mod blog_view;
mod category;
mod comment;
mod like;
mod slug;
mod user;
mod vote;

pub use blog::Blog;
pub use blog_view::BlogView;
pub use category::Category;
pub use comment::Comment;
pub use like::Like;
pub use slug::slugify;
pub use user::{Role, User};
pub use vote::Vote;
