// Presentation layer - HTTP shell
pub mod app_state;
pub mod handlers;
pub mod page;
pub mod routes;
