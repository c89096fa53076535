use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Avatar assigned when a todo is created without an image.
pub const DEFAULT_TODO_IMAGE: &str = "https://api.dicebear.com/9.x/icons/svg?seed=Katherine";

/// Longest accepted description.
pub const MAX_DESC_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "todo_status", rename_all = "lowercase")]
pub enum TodoStatus {
    Active,
    Finished,
}

/// Todo record in the database. Wire names match the column names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub todo_name: String,
    pub todo_desc: String,
    pub todo_image: String,
    pub todo_status: TodoStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TodoStatus::Active).unwrap(), r#""active""#);
        assert_eq!(
            serde_json::to_string(&TodoStatus::Finished).unwrap(),
            r#""finished""#
        );
        let s: TodoStatus = serde_json::from_str(r#""finished""#).unwrap();
        assert_eq!(s, TodoStatus::Finished);
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_str::<TodoStatus>(r#""done""#).is_err());
    }
}
