use sqlx::PgPool;
use uuid::Uuid;

use crate::todos::dto::UpdateTodoRequest;
use crate::todos::repo_types::{Todo, TodoStatus};

impl Todo {
    /// All todos owned by one user, in insertion order.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Todo>> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, todo_name, todo_desc, todo_image, todo_status,
                   created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        desc: &str,
        image: &str,
        status: TodoStatus,
    ) -> sqlx::Result<Todo> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (user_id, todo_name, todo_desc, todo_image, todo_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, todo_name, todo_desc, todo_image, todo_status,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(desc)
        .bind(image)
        .bind(status)
        .fetch_one(db)
        .await
    }

    /// Overwrite the provided fields of a todo located by (id, owner).
    /// Returns None when the id does not exist or belongs to another user;
    /// the two cases are indistinguishable on purpose.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        fields: &UpdateTodoRequest,
    ) -> sqlx::Result<Option<Todo>> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos SET
                todo_name = COALESCE($3, todo_name),
                todo_desc = COALESCE($4, todo_desc),
                todo_image = COALESCE($5, todo_image),
                todo_status = COALESCE($6, todo_status),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, todo_name, todo_desc, todo_image, todo_status,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(fields.todo_name.as_deref())
        .bind(fields.todo_desc.as_deref())
        .bind(fields.todo_image.as_deref())
        .bind(fields.todo_status)
        .fetch_optional(db)
        .await
    }

    /// Ownership-scoped delete. Returns false when nothing matched.
    pub async fn delete(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
