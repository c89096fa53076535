use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User};

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, personal_id, name, email, password_hash, address, phone_number,
                   activated, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, personal_id, name, email, password_hash, address, phone_number,
                   activated, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new inactive user with hashed password.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (personal_id, name, email, password_hash, address, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, personal_id, name, email, password_hash, address, phone_number,
                      activated, created_at
            "#,
        )
        .bind(new.personal_id)
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.address)
        .bind(new.phone_number)
        .fetch_one(db)
        .await
    }

    /// Mark a user active. Returns false when no such user exists.
    /// Re-activating an already-active account is a no-op success.
    pub async fn activate(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("UPDATE users SET activated = TRUE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
