//! Request repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_entity::course::{Class, CourseId};
use crs_entity::request::{CourseRequest, RequestDetails, RequestPayload, RequestResponse};

use crate::store::RequestStore;

/// Repository for student requests and their one-shot responses.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

/// Database row shape for a request.
#[derive(sqlx::FromRow)]
struct RequestRow {
    id: Uuid,
    from_email: String,
    course_code: String,
    course_term: String,
    section: String,
    details: Json<RequestDetails>,
    payload: Json<RequestPayload>,
    created_at: DateTime<Utc>,
    response: Option<Json<RequestResponse>>,
}

impl From<RequestRow> for CourseRequest {
    fn from(row: RequestRow) -> Self {
        Self {
            id: row.id,
            from: row.from_email,
            class: Class {
                course: CourseId {
                    code: row.course_code,
                    term: row.course_term,
                },
                section: row.section,
            },
            details: row.details.0,
            payload: row.payload.0,
            created_at: row.created_at,
            response: row.response.map(|r| r.0),
        }
    }
}

const SELECT_REQUEST: &str = "SELECT id, from_email, course_code, course_term, section, \
                              details, payload, created_at, response FROM requests";

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestRepository {
    async fn insert(&self, request: &CourseRequest) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO requests \
             (id, kind, from_email, course_code, course_term, section, details, payload, created_at, response) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NULL)",
        )
        .bind(request.id)
        .bind(request.kind().as_str())
        .bind(&request.from)
        .bind(&request.class.course.code)
        .bind(&request.class.course.term)
        .bind(&request.class.section)
        .bind(Json(&request.details))
        .bind(Json(&request.payload))
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Integrity(format!("Failed to create request: {e}")))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CourseRequest>> {
        sqlx::query_as::<_, RequestRow>(&format!("{SELECT_REQUEST} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(CourseRequest::from))
            .map_err(|e| DomainError::store("Failed to find request", e))
    }

    async fn find_for_user(
        &self,
        email: &str,
        instructor_classes: &[Class],
    ) -> DomainResult<Vec<CourseRequest>> {
        let codes: Vec<String> = instructor_classes
            .iter()
            .map(|c| c.course.code.clone())
            .collect();
        let terms: Vec<String> = instructor_classes
            .iter()
            .map(|c| c.course.term.clone())
            .collect();
        let sections: Vec<String> = instructor_classes
            .iter()
            .map(|c| c.section.clone())
            .collect();

        let rows = sqlx::query_as::<_, RequestRow>(&format!(
            "{SELECT_REQUEST} \
             WHERE from_email = $1 \
                OR (course_code, course_term, section) IN \
                   (SELECT * FROM UNNEST($2::text[], $3::text[], $4::text[])) \
             ORDER BY created_at DESC"
        ))
        .bind(email)
        .bind(&codes)
        .bind(&terms)
        .bind(&sections)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to list requests", e))?;

        Ok(rows.into_iter().map(CourseRequest::from).collect())
    }

    async fn find_by_course(&self, course: &CourseId) -> DomainResult<Vec<CourseRequest>> {
        let rows = sqlx::query_as::<_, RequestRow>(&format!(
            "{SELECT_REQUEST} WHERE course_code = $1 AND course_term = $2 \
             ORDER BY created_at DESC"
        ))
        .bind(&course.code)
        .bind(&course.term)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::store("Failed to list course requests", e))?;

        Ok(rows.into_iter().map(CourseRequest::from).collect())
    }

    async fn set_response_if_absent(
        &self,
        id: Uuid,
        response: &RequestResponse,
    ) -> DomainResult<bool> {
        // Conditioned on the response still being absent at write time, so
        // the losing side of a concurrent race cannot overwrite.
        let result =
            sqlx::query("UPDATE requests SET response = $2 WHERE id = $1 AND response IS NULL")
                .bind(id)
                .bind(Json(response))
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::Integrity(format!("Failed to create response: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
