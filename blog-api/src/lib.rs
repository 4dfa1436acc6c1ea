mod auth;
mod routes;

pub use auth::Viewer;
pub use routes::create_app;
