//! Schema bootstrap for the users table
//!
//! Only run on request (`userapi migrate` or `serve --migrate`); the
//! service never creates schema implicitly.

use sqlx::PgPool;

use super::DbError;

/// Create the users table if it does not exist
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running users migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            department TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Users migrations complete");
    Ok(())
}
