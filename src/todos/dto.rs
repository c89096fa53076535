use serde::{Deserialize, Serialize};

use crate::todos::repo_types::{Todo, TodoStatus};

/// Request body for creating a todo. `todo_name` is the only hard requirement;
/// the rest fall back to the model defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub todo_name: String,
    pub todo_desc: Option<String>,
    pub todo_image: Option<String>,
    pub todo_status: Option<TodoStatus>,
}

/// Request body for updating a todo: any subset of fields.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub todo_name: Option<String>,
    pub todo_desc: Option<String>,
    pub todo_image: Option<String>,
    pub todo_status: Option<TodoStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedTodoResponse {
    pub message: String,
    #[serde(rename = "newTodo")]
    pub new_todo: Todo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatedTodoResponse {
    pub message: String,
    #[serde(rename = "updatedTodo")]
    pub updated_todo: Todo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_accepts_any_subset() {
        let req: UpdateTodoRequest =
            serde_json::from_str(r#"{"todo_status":"finished"}"#).unwrap();
        assert!(req.todo_name.is_none());
        assert_eq!(req.todo_status, Some(TodoStatus::Finished));

        let empty: UpdateTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.todo_name.is_none());
        assert!(empty.todo_status.is_none());
    }

    #[test]
    fn create_request_parses_wire_fields() {
        let req: CreateTodoRequest = serde_json::from_str(
            r#"{"todo_name":"Buy milk","todo_desc":"2%","todo_status":"active"}"#,
        )
        .unwrap();
        assert_eq!(req.todo_name, "Buy milk");
        assert!(req.todo_image.is_none());
    }
}
