pub mod auth_handlers;
pub mod docs_handlers;
pub mod extract;
pub mod health_handlers;
pub mod movie_handlers;
