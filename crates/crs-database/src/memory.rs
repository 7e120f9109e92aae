//! In-memory store implementation.
//!
//! Implements the same contracts as the PostgreSQL repositories over plain
//! maps guarded by an async lock. Used by service and router tests, where
//! spinning up a database would add nothing to what is being verified.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_entity::course::{Assignment, Class, Course, CourseId, Section};
use crs_entity::request::{CourseRequest, RequestKind, RequestResponse};
use crs_entity::user::{Enrollment, Role, User};

use crate::store::{CourseStore, RequestStore, UserStore};

/// A process-local store holding all three collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<BTreeMap<String, User>>,
    courses: RwLock<BTreeMap<(String, String), Course>>,
    requests: RwLock<Vec<CourseRequest>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create_if_absent(&self, email: &str) -> DomainResult<()> {
        self.users
            .write()
            .await
            .entry(email.to_string())
            .or_insert_with(|| User {
                email: email.to_string(),
                name: String::new(),
                enrollment: Vec::new(),
            });
        Ok(())
    }

    async fn set_name(&self, email: &str, name: &str) -> DomainResult<()> {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.name = name.to_string();
        }
        Ok(())
    }

    async fn find_by_course(&self, course: &CourseId) -> DomainResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.enrollment.iter().any(|e| e.course == *course))
            .cloned()
            .collect())
    }

    async fn find_by_class_role(&self, class: &Class, role: Role) -> DomainResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.has_class_role(class, role))
            .cloned()
            .collect())
    }

    async fn add_enrollment(&self, email: &str, enrollment: &Enrollment) -> DomainResult<()> {
        if let Some(user) = self.users.write().await.get_mut(email) {
            // Set-add: a structurally-equal entry is not appended twice.
            if !user.enrollment.contains(enrollment) {
                user.enrollment.push(enrollment.clone());
            }
        }
        Ok(())
    }

    async fn remove_enrollment(&self, email: &str, enrollment: &Enrollment) -> DomainResult<()> {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.enrollment.retain(|e| e != enrollment);
        }
        Ok(())
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn insert(&self, course: &Course) -> DomainResult<()> {
        let mut courses = self.courses.write().await;
        let key = (course.code.clone(), course.term.clone());
        if courses.contains_key(&key) {
            return Err(DomainError::CourseAlreadyExists {
                code: course.code.clone(),
                term: course.term.clone(),
            });
        }
        courses.insert(key, course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> DomainResult<Option<Course>> {
        Ok(self
            .courses
            .read()
            .await
            .get(&(id.code.clone(), id.term.clone()))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[CourseId]) -> DomainResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| courses.get(&(id.code.clone(), id.term.clone())).cloned())
            .collect())
    }

    async fn update_sections(
        &self,
        id: &CourseId,
        sections: &BTreeMap<String, Section>,
    ) -> DomainResult<()> {
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(&(id.code.clone(), id.term.clone()))
            .ok_or_else(|| DomainError::course_not_found(&id.code, &id.term))?;
        course.sections = sections.clone();
        Ok(())
    }

    async fn update_assignments(
        &self,
        id: &CourseId,
        assignments: &BTreeMap<String, Assignment>,
    ) -> DomainResult<()> {
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(&(id.code.clone(), id.term.clone()))
            .ok_or_else(|| DomainError::course_not_found(&id.code, &id.term))?;
        course.assignments = assignments.clone();
        Ok(())
    }

    async fn update_request_types(
        &self,
        id: &CourseId,
        types: &BTreeMap<RequestKind, bool>,
    ) -> DomainResult<()> {
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(&(id.code.clone(), id.term.clone()))
            .ok_or_else(|| DomainError::course_not_found(&id.code, &id.term))?;
        course.effective_request_types = types.clone();
        Ok(())
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn insert(&self, request: &CourseRequest) -> DomainResult<()> {
        self.requests.write().await.push(request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CourseRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_for_user(
        &self,
        email: &str,
        instructor_classes: &[Class],
    ) -> DomainResult<Vec<CourseRequest>> {
        let mut matched: Vec<CourseRequest> = self
            .requests
            .read()
            .await
            .iter()
            .filter(|r| r.from == email || instructor_classes.contains(&r.class))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn find_by_course(&self, course: &CourseId) -> DomainResult<Vec<CourseRequest>> {
        let mut matched: Vec<CourseRequest> = self
            .requests
            .read()
            .await
            .iter()
            .filter(|r| r.class.course == *course)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn set_response_if_absent(
        &self,
        id: Uuid,
        response: &RequestResponse,
    ) -> DomainResult<bool> {
        let mut requests = self.requests.write().await;
        match requests.iter_mut().find(|r| r.id == id) {
            Some(request) if request.response.is_none() => {
                request.response = Some(response.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(code: &str, role: Role, sections: &[&str]) -> Enrollment {
        Enrollment {
            course: CourseId {
                code: code.to_string(),
                term: "2510".to_string(),
            },
            role,
            sections: sections.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_add_enrollment_is_set_add() {
        let store = MemoryStore::new();
        store.create_if_absent("u@ust.hk").await.unwrap();

        let entry = enrollment("COMP 1023", Role::Student, &["L1"]);
        store.add_enrollment("u@ust.hk", &entry).await.unwrap();
        store.add_enrollment("u@ust.hk", &entry).await.unwrap();

        let user = store.find_by_email("u@ust.hk").await.unwrap().unwrap();
        assert_eq!(user.enrollment.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_enrollment_is_noop() {
        let store = MemoryStore::new();
        store.create_if_absent("u@ust.hk").await.unwrap();
        store
            .add_enrollment("u@ust.hk", &enrollment("COMP 1023", Role::Student, &["L1"]))
            .await
            .unwrap();

        store
            .remove_enrollment("u@ust.hk", &enrollment("COMP 2011", Role::Ta, &["T1"]))
            .await
            .unwrap();

        let user = store.find_by_email("u@ust.hk").await.unwrap().unwrap();
        assert_eq!(user.enrollment.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_course_insert_conflicts() {
        let store = MemoryStore::new();
        let course = Course {
            code: "COMP 1023".to_string(),
            term: "2510".to_string(),
            title: "Python Programming".to_string(),
            sections: BTreeMap::new(),
            assignments: BTreeMap::new(),
            effective_request_types: BTreeMap::new(),
        };
        CourseStore::insert(&store, &course).await.unwrap();
        let err = CourseStore::insert(&store, &course).await.unwrap_err();
        assert!(matches!(err, DomainError::CourseAlreadyExists { .. }));
    }
}
