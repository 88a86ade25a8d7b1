use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::User;

const USER_COLUMNS: &str = "id, email, password_hash, created_at";

/// Postgres error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("select user by email")?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("select user by id")?;
        Ok(user)
    }

    /// `None` when the email is already registered.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let res = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await;

        match res {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert user")),
        }
    }
}
