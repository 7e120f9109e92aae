//! Course repository implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_entity::course::{Assignment, Course, CourseId, Section};
use crs_entity::request::RequestKind;

use crate::store::CourseStore;

/// Repository for course offerings.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

/// Database row shape for a course.
#[derive(sqlx::FromRow)]
struct CourseRow {
    code: String,
    term: String,
    title: String,
    sections: Json<BTreeMap<String, Section>>,
    assignments: Json<BTreeMap<String, Assignment>>,
    effective_request_types: Json<BTreeMap<RequestKind, bool>>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            code: row.code,
            term: row.term,
            title: row.title,
            sections: row.sections.0,
            assignments: row.assignments.0,
            effective_request_types: row.effective_request_types.0,
        }
    }
}

const SELECT_COURSE: &str =
    "SELECT code, term, title, sections, assignments, effective_request_types FROM courses";

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Overwrite one JSONB column of a course wholesale.
    async fn overwrite_column(
        &self,
        id: &CourseId,
        column: &str,
        value: serde_json::Value,
    ) -> DomainResult<()> {
        let query = format!(
            "UPDATE courses SET {column} = $3, updated_at = now() WHERE code = $1 AND term = $2"
        );
        let result = sqlx::query(&query)
            .bind(&id.code)
            .bind(&id.term)
            .bind(Json(value))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to update course {column}"), e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::course_not_found(&id.code, &id.term));
        }
        Ok(())
    }
}

#[async_trait]
impl CourseStore for CourseRepository {
    async fn insert(&self, course: &Course) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO courses (code, term, title, sections, assignments, effective_request_types) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&course.code)
        .bind(&course.term)
        .bind(&course.title)
        .bind(Json(&course.sections))
        .bind(Json(&course.assignments))
        .bind(Json(&course.effective_request_types))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("courses_pkey") => {
                DomainError::CourseAlreadyExists {
                    code: course.code.clone(),
                    term: course.term.clone(),
                }
            }
            _ => DomainError::Integrity(format!("Failed to create course: {e}")),
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> DomainResult<Option<Course>> {
        sqlx::query_as::<_, CourseRow>(&format!("{SELECT_COURSE} WHERE code = $1 AND term = $2"))
            .bind(&id.code)
            .bind(&id.term)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Course::from))
            .map_err(|e| DomainError::store("Failed to find course", e))
    }

    async fn find_by_ids(&self, ids: &[CourseId]) -> DomainResult<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let codes: Vec<String> = ids.iter().map(|id| id.code.clone()).collect();
        let terms: Vec<String> = ids.iter().map(|id| id.term.clone()).collect();

        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "{SELECT_COURSE} \
             WHERE (code, term) IN (SELECT * FROM UNNEST($1::text[], $2::text[])) \
             ORDER BY code ASC, term ASC"
        ))
        .bind(&codes)
        .bind(&terms)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to list courses", e))?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn update_sections(
        &self,
        id: &CourseId,
        sections: &BTreeMap<String, Section>,
    ) -> DomainResult<()> {
        let value = serde_json::to_value(sections)
            .map_err(|e| DomainError::store("Failed to encode sections", e))?;
        self.overwrite_column(id, "sections", value).await
    }

    async fn update_assignments(
        &self,
        id: &CourseId,
        assignments: &BTreeMap<String, Assignment>,
    ) -> DomainResult<()> {
        let value = serde_json::to_value(assignments)
            .map_err(|e| DomainError::store("Failed to encode assignments", e))?;
        self.overwrite_column(id, "assignments", value).await
    }

    async fn update_request_types(
        &self,
        id: &CourseId,
        types: &BTreeMap<RequestKind, bool>,
    ) -> DomainResult<()> {
        let value = serde_json::to_value(types)
            .map_err(|e| DomainError::store("Failed to encode request types", e))?;
        self.overwrite_column(id, "effective_request_types", value)
            .await
    }
}
