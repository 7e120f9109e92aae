//! User repository implementation.
//!
//! The enrollment list is a JSONB array; role/class membership queries use
//! JSONB containment against the GIN index, and enrollment mutations keep
//! the original store's set-add / structural-equality-removal semantics.
//! JSONB equality in PostgreSQL is structural (key order insensitive).

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_entity::course::{Class, CourseId};
use crs_entity::user::{Enrollment, Role, User};

use crate::store::UserStore;

/// Repository for user records and their embedded enrollment arrays.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

/// Database row shape for a user.
#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    name: String,
    enrollment: Json<Vec<Enrollment>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            email: row.email,
            name: row.name,
            enrollment: row.enrollment.0,
        }
    }
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            "SELECT email, name, enrollment FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(User::from))
        .map_err(|e| DomainError::store("Failed to find user by email", e))
    }

    async fn create_if_absent(&self, email: &str) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO users (email, name, enrollment) VALUES ($1, '', '[]'::jsonb) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to create user", e))?;
        Ok(())
    }

    async fn set_name(&self, email: &str, name: &str) -> DomainResult<()> {
        sqlx::query("UPDATE users SET name = $2, updated_at = now() WHERE email = $1")
            .bind(email)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store("Failed to update user name", e))?;
        Ok(())
    }

    async fn find_by_course(&self, course: &CourseId) -> DomainResult<Vec<User>> {
        let probe = json!([{ "course": { "code": course.code, "term": course.term } }]);

        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT email, name, enrollment FROM users WHERE enrollment @> $1 \
             ORDER BY email ASC",
        )
        .bind(Json(probe))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to list users by course", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_class_role(&self, class: &Class, role: Role) -> DomainResult<Vec<User>> {
        // Array containment matches entries whose section list includes the
        // class's section.
        let probe = json!([{
            "course": { "code": class.course.code, "term": class.course.term },
            "role": role,
            "sections": [class.section],
        }]);

        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT email, name, enrollment FROM users WHERE enrollment @> $1 \
             ORDER BY email ASC",
        )
        .bind(Json(probe))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to list users by class role", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn add_enrollment(&self, email: &str, enrollment: &Enrollment) -> DomainResult<()> {
        let entry = serde_json::to_value(enrollment)
            .map_err(|e| DomainError::store("Failed to encode enrollment", e))?;

        // Set-add: append only when no structurally-equal entry exists.
        sqlx::query(
            "UPDATE users \
             SET enrollment = enrollment || $2, updated_at = now() \
             WHERE email = $1 \
               AND NOT EXISTS ( \
                   SELECT 1 FROM jsonb_array_elements(users.enrollment) AS e WHERE e = $3 \
               )",
        )
        .bind(email)
        .bind(Json(json!([entry.clone()])))
        .bind(Json(entry))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to add enrollment", e))?;
        Ok(())
    }

    async fn remove_enrollment(&self, email: &str, enrollment: &Enrollment) -> DomainResult<()> {
        let entry = serde_json::to_value(enrollment)
            .map_err(|e| DomainError::store("Failed to encode enrollment", e))?;

        // Rebuild the array without structurally-equal entries; removing a
        // non-existent entry leaves the array unchanged.
        sqlx::query(
            "UPDATE users \
             SET enrollment = ( \
                 SELECT COALESCE(jsonb_agg(e), '[]'::jsonb) \
                 FROM jsonb_array_elements(users.enrollment) AS e \
                 WHERE e <> $2 \
             ), updated_at = now() \
             WHERE email = $1",
        )
        .bind(email)
        .bind(Json(entry))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to remove enrollment", e))?;
        Ok(())
    }
}
