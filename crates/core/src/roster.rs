//! Registration, suspension, and common-student queries.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::{EdgeSet, RosterStore};
use crate::types::{StudentId, TeacherId};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterStudentsRequest {
    pub teacher: TeacherId,
    pub students: Vec<StudentId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuspendStudentRequest {
    pub student: StudentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonStudentsResponse {
    pub students: Vec<StudentId>,
}

/// Roster operations over a [`RosterStore`].
pub struct RosterService<'a> {
    store: &'a dyn RosterStore,
}

impl<'a> RosterService<'a> {
    pub fn new(store: &'a dyn RosterStore) -> Self {
        Self { store }
    }

    /// Register each student under the teacher, in order.
    ///
    /// Stops at the first student that is already registered; students
    /// registered earlier in the same call stay registered.
    pub async fn register_students(
        &self,
        request: &RegisterStudentsRequest,
    ) -> Result<(), CoreError> {
        if request.teacher.is_empty() {
            return Err(CoreError::InvalidRequest(
                "Missing teacher specified.".into(),
            ));
        }
        if request.students.iter().any(String::is_empty) {
            return Err(CoreError::InvalidRequest(
                "Missing student specified.".into(),
            ));
        }

        for student in &request.students {
            let created = self
                .store
                .insert_edge_if_absent(EdgeSet::Registration, &request.teacher, student)
                .await?;
            if !created {
                return Err(CoreError::Conflict(
                    "Student has been registered previously.".into(),
                ));
            }
        }
        Ok(())
    }

    pub async fn suspend_student(&self, request: &SuspendStudentRequest) -> Result<(), CoreError> {
        if request.student.is_empty() {
            return Err(CoreError::InvalidRequest(
                "Missing student specified.".into(),
            ));
        }
        if !self.store.suspend(&request.student).await? {
            return Err(CoreError::Conflict(
                "Student has been suspended previously.".into(),
            ));
        }
        Ok(())
    }

    /// Students registered under all of `teachers`. Repeated teachers count once.
    pub async fn common_students(
        &self,
        teachers: &[String],
    ) -> Result<CommonStudentsResponse, CoreError> {
        if teachers.is_empty() || teachers.iter().any(String::is_empty) {
            return Err(CoreError::InvalidRequest("No teacher specified.".into()));
        }

        let mut distinct = teachers.to_vec();
        distinct.sort();
        distinct.dedup();

        let students = self.store.common_students(&distinct).await?;
        Ok(CommonStudentsResponse { students })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::memory::MemoryRosterStore;

    async fn register(store: &MemoryRosterStore, teacher: &str, students: &[&str]) {
        RosterService::new(store)
            .register_students(&RegisterStudentsRequest {
                teacher: teacher.into(),
                students: students.iter().map(|s| s.to_string()).collect(),
            })
            .await
            .unwrap();
    }

    fn teachers(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn register_rejects_missing_teacher() {
        let store = MemoryRosterStore::new();
        let result = RosterService::new(&store)
            .register_students(&RegisterStudentsRequest {
                teacher: String::new(),
                students: vec!["s1@x.com".into()],
            })
            .await;
        assert_matches!(result, Err(CoreError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn register_twice_conflicts() {
        let store = MemoryRosterStore::new();
        register(&store, "t1@x.com", &["s1@x.com"]).await;

        let result = RosterService::new(&store)
            .register_students(&RegisterStudentsRequest {
                teacher: "t1@x.com".into(),
                students: vec!["s2@x.com".into(), "s1@x.com".into()],
            })
            .await;

        assert_matches!(result, Err(CoreError::Conflict(_)));
        // s2 was written before the conflict was hit.
        assert_eq!(store.edge_count(EdgeSet::Registration).await, 2);
    }

    #[tokio::test]
    async fn registration_does_not_opt_in() {
        let store = MemoryRosterStore::new();
        register(&store, "t1@x.com", &["s1@x.com"]).await;
        assert_eq!(store.edge_count(EdgeSet::NotificationOptIn).await, 0);
    }

    #[tokio::test]
    async fn suspend_twice_conflicts() {
        let store = MemoryRosterStore::new();
        let service = RosterService::new(&store);
        let request = SuspendStudentRequest {
            student: "s1@x.com".into(),
        };

        service.suspend_student(&request).await.unwrap();
        assert!(store.is_suspended("s1@x.com").await.unwrap());
        assert_matches!(
            service.suspend_student(&request).await,
            Err(CoreError::Conflict(_))
        );
    }

    #[tokio::test]
    async fn suspend_rejects_empty_student() {
        let store = MemoryRosterStore::new();
        let result = RosterService::new(&store)
            .suspend_student(&SuspendStudentRequest::default())
            .await;
        assert_matches!(result, Err(CoreError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn common_students_intersects_teachers() {
        let store = MemoryRosterStore::new();
        register(&store, "t1@x.com", &["s1@x.com", "s2@x.com", "s3@x.com"]).await;
        register(&store, "t2@x.com", &["s3@x.com", "s1@x.com", "s4@x.com"]).await;

        let service = RosterService::new(&store);
        let both = service
            .common_students(&teachers(&["t1@x.com", "t2@x.com"]))
            .await
            .unwrap();
        assert_eq!(both.students, vec!["s1@x.com", "s3@x.com"]);

        let one = service
            .common_students(&teachers(&["t1@x.com", "t1@x.com"]))
            .await
            .unwrap();
        assert_eq!(one.students, vec!["s1@x.com", "s2@x.com", "s3@x.com"]);
    }

    #[tokio::test]
    async fn common_students_unknown_teacher_is_empty() {
        let store = MemoryRosterStore::new();
        register(&store, "t1@x.com", &["s1@x.com"]).await;

        let result = RosterService::new(&store)
            .common_students(&teachers(&["t1@x.com", "nobody@x.com"]))
            .await
            .unwrap();
        assert!(result.students.is_empty());
    }

    #[tokio::test]
    async fn common_students_requires_a_teacher() {
        let store = MemoryRosterStore::new();
        let result = RosterService::new(&store).common_students(&[]).await;
        assert_matches!(result, Err(CoreError::InvalidRequest(_)));
    }
}
