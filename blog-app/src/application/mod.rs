mod accounts;
mod blogs;
mod categories;
mod engagement;

pub use accounts::{AccountService, LoginResult, RefreshResult};
pub use blogs::{BlogService, CreateBlogInput, UpdateBlogInput};
pub use categories::CategoryService;
pub use engagement::EngagementService;
