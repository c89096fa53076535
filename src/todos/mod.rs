use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use repo_types::{Todo, TodoStatus};

pub fn router() -> Router<AppState> {
    handlers::todo_routes()
}
