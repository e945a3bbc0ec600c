//! HTTP API handlers

pub mod context;
pub mod health;
pub mod history;
pub mod predict;
pub mod ui;

pub use context::get_context;
pub use health::{health_check, health_routes};
pub use history::get_history;
pub use predict::post_predict;
pub use ui::{serve_app_js, serve_index};
