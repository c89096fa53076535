use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{ApiError, MessageBody};
use crate::state::AppState;
use crate::todos::dto::{
    CreateTodoRequest, CreatedTodoResponse, UpdateTodoRequest, UpdatedTodoResponse,
};
use crate::todos::repo_types::{Todo, TodoStatus, DEFAULT_TODO_IMAGE, MAX_DESC_LEN};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todo/get_all", get(get_all))
        .route("/todo/add_todo", post(add_todo))
        .route("/todo/update_todo/:id", patch(update_todo))
        .route("/todo/delete_todo/:id", delete(delete_todo))
}

fn validate_desc(desc: &str) -> Result<(), ApiError> {
    if desc.chars().count() > MAX_DESC_LEN {
        warn!(len = desc.chars().count(), "description too long");
        return Err(ApiError::Validation(
            "Description must be 500 characters or fewer.".into(),
        ));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn get_all(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = Todo::list_by_user(&state.db, user_id).await?;
    Ok(Json(todos))
}

#[instrument(skip(state, payload))]
pub async fn add_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<Json<CreatedTodoResponse>, ApiError> {
    if payload.todo_name.trim().is_empty() {
        warn!("add_todo with empty name");
        return Err(ApiError::Validation(
            "Please fill in the required fields.".into(),
        ));
    }

    let desc = payload.todo_desc.unwrap_or_default();
    validate_desc(&desc)?;
    let image = payload
        .todo_image
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| DEFAULT_TODO_IMAGE.to_string());
    let status = payload.todo_status.unwrap_or(TodoStatus::Active);

    let todo = Todo::create(&state.db, user_id, &payload.todo_name, &desc, &image, status).await?;

    info!(user_id = %user_id, todo_id = %todo.id, "todo created");
    Ok(Json(CreatedTodoResponse {
        message: "Create a to do list successfully!".into(),
        new_todo: todo,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTodoRequest>,
) -> Result<Json<UpdatedTodoResponse>, ApiError> {
    if let Some(name) = &payload.todo_name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Please fill in the required fields.".into(),
            ));
        }
    }
    if let Some(desc) = &payload.todo_desc {
        validate_desc(desc)?;
    }

    // A wrong id and a wrong owner are the same "not found".
    let todo = Todo::update(&state.db, id, user_id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("To-do not found.".into()))?;

    info!(user_id = %user_id, todo_id = %todo.id, "todo updated");
    Ok(Json(UpdatedTodoResponse {
        message: "To-do updated successfully!".into(),
        updated_todo: todo,
    }))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageBody>, ApiError> {
    if !Todo::delete(&state.db, id, user_id).await? {
        return Err(ApiError::NotFound("To-do not found.".into()));
    }

    info!(user_id = %user_id, todo_id = %id, "todo deleted");
    Ok(Json(MessageBody {
        message: "To-do deleted successfully!".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desc_validation_caps_at_500_chars() {
        assert!(validate_desc("").is_ok());
        assert!(validate_desc(&"x".repeat(500)).is_ok());
        let err = validate_desc(&"x".repeat(501)).unwrap_err();
        assert_eq!(err.kind(), "validation");
        // Counted in characters, not bytes.
        assert!(validate_desc(&"ü".repeat(500)).is_ok());
    }
}
