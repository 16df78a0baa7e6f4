// Presentation layer - JSON HTTP API
pub mod app_state;
pub mod handlers;
