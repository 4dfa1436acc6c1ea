pub mod blog;
pub mod blog_tag;
pub mod category;
pub mod comment;
pub mod like;
pub mod tag;
pub mod user;
pub mod vote;

pub use blog::Entity as Blog;
pub use blog_tag::Entity as BlogTag;
pub use category::Entity as Category;
pub use comment::Entity as Comment;
pub use like::Entity as Like;
pub use tag::Entity as Tag;
pub use user::Entity as User;
pub use vote::Entity as Vote;
