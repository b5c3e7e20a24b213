//! User repository
//!
//! - list: ascending id order
//! - find: path id read the way PostgreSQL reads an integer; anything else matches nothing
//! - create: INSERT ... RETURNING, unique violations surface as DbError::UniqueViolation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::NewUser;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
}

/// Access to the user table
///
/// Handlers only see this trait; the process wires in [`PgUserRepo`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Run a trivial query to confirm the store answers.
    async fn ping(&self) -> Result<(), DbError>;

    /// All users, ascending by id.
    async fn list(&self) -> Result<Vec<User>, DbError>;

    /// Look up a user by the raw id path segment.
    async fn find(&self, id: &str) -> Result<User, DbError>;

    async fn create(&self, user: NewUser) -> Result<User, DbError>;

    /// Stop handing out connections and close the ones already open.
    async fn close(&self);
}

/// Integer key for a raw id path segment.
///
/// Accepts what PostgreSQL's integer input accepts: surrounding whitespace,
/// an optional sign and leading zeros. Anything else (including values out of
/// `INT4` range) has no matching row.
pub fn parse_user_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub(crate) fn user_not_found(id: &str) -> DbError {
    DbError::NotFound {
        resource: "user",
        id: id.to_owned(),
    }
}

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, department
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find(&self, id: &str) -> Result<User, DbError> {
        // Compare on the text form so an arbitrary path segment never fails the cast
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, department
            FROM users
            WHERE id::text = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_owned(),
        })
    }

    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, department)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, department
            "#,
        )
        .bind(user.name())
        .bind(user.email())
        .bind(user.department())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_integer_forms() {
        assert_eq!(parse_user_id("7"), Some(7));
        assert_eq!(parse_user_id("007"), Some(7));
        assert_eq!(parse_user_id("+7"), Some(7));
        assert_eq!(parse_user_id(" 7 "), Some(7));
        assert_eq!(parse_user_id("-3"), Some(-3));
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id("7.0"), None);
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("99999999999"), None);
    }

    #[test]
    fn user_serializes_null_department() {
        let user = User {
            id: 7,
            name: "Bo".into(),
            email: "bo@x.com".into(),
            department: None,
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"id": 7, "name": "Bo", "email": "bo@x.com", "department": null})
        );
    }
}
