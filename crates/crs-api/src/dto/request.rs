//! Request body shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crs_entity::course::{Assignment, Class, Section};
use crs_entity::request::{Decision, ProofAttachment, RequestKind, RequestPayload};
use crs_entity::user::{Enrollment, Role};

/// Body of `POST /api/enrollments` and `DELETE /api/enrollments`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnrollmentChangeRequest {
    /// Email of the user whose enrollment changes.
    #[validate(email)]
    pub user: String,
    /// The enrollment entry to add or remove.
    pub enrollment: Enrollment,
}

/// Query string of the class roster endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleQuery {
    /// The role to list.
    pub role: Role,
}

/// Body of `PUT /api/courses/{code}/{term}/sections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSectionsRequest {
    /// The new sections map; replaces the old one wholesale.
    pub sections: BTreeMap<String, Section>,
}

/// Body of `PUT /api/courses/{code}/{term}/assignments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAssignmentsRequest {
    /// The new assignments map; replaces the old one wholesale.
    pub assignments: BTreeMap<String, Assignment>,
}

/// Body of `PUT /api/courses/{code}/{term}/request-types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestTypesRequest {
    /// The new toggle map; replaces the old one wholesale.
    pub effective_request_types: BTreeMap<RequestKind, bool>,
}

/// Body of `POST /api/requests`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestRequest {
    /// The class the request targets.
    pub class: Class,
    /// A brief explanation of the request.
    #[validate(length(min = 1, message = "Reason must not be empty"))]
    pub reason: String,
    /// Optional supporting documents.
    #[serde(default)]
    pub proof: Vec<ProofAttachment>,
    /// Kind-specific metadata.
    pub payload: RequestPayload,
}

/// Body of `POST /api/requests/{id}/response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponseRequest {
    /// The decision.
    pub decision: Decision,
    /// Free-text remarks accompanying the decision.
    #[serde(default)]
    pub remarks: String,
}
