//! Storage collaborator contract.
//!
//! The resolver and roster operations only ever see a [`RosterStore`]. The
//! production implementation lives in `classroom_db`; [`MemoryRosterStore`]
//! backs unit and HTTP tests.
//!
//! [`MemoryRosterStore`]: crate::memory::MemoryRosterStore

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::StudentId;

/// The two teacher -> student edge sets the service keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSet {
    /// Students a teacher has registered.
    Registration,
    /// Students a teacher has @-mentioned in a notification.
    NotificationOptIn,
}

impl EdgeSet {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeSet::Registration => "registration",
            EdgeSet::NotificationOptIn => "notification_opt_in",
        }
    }
}

/// Set/query operations over registrations, opt-ins and suspensions.
///
/// Implementations report every failure as [`CoreError::Persistence`].
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Whether the `(teacher, student)` edge exists in `set`.
    async fn edge_exists(
        &self,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<bool, CoreError>;

    /// Insert the `(teacher, student)` edge unless it already exists.
    ///
    /// Returns `true` if a new edge was created. Concurrent calls for the
    /// same pair must not fail.
    async fn insert_edge_if_absent(
        &self,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<bool, CoreError>;

    /// All students linked to `teacher` in `set`.
    async fn edges_by_source(&self, set: EdgeSet, teacher: &str)
        -> Result<Vec<StudentId>, CoreError>;

    /// Students linked to `teacher` in `set` who are not suspended.
    ///
    /// The default filters [`edges_by_source`] through [`is_suspended`];
    /// backends that can compute the difference in one query should.
    ///
    /// [`edges_by_source`]: RosterStore::edges_by_source
    /// [`is_suspended`]: RosterStore::is_suspended
    async fn unsuspended_by_source(
        &self,
        set: EdgeSet,
        teacher: &str,
    ) -> Result<Vec<StudentId>, CoreError> {
        let mut students = Vec::new();
        for student in self.edges_by_source(set, teacher).await? {
            if !self.is_suspended(&student).await? {
                students.push(student);
            }
        }
        Ok(students)
    }

    /// Whether `student` is globally suspended.
    async fn is_suspended(&self, student: &str) -> Result<bool, CoreError>;

    /// Suspend `student`. Returns `true` if the student was not suspended before.
    async fn suspend(&self, student: &str) -> Result<bool, CoreError>;

    /// Students registered under every one of `teachers`, sorted ascending.
    ///
    /// `teachers` must be non-empty and free of duplicates.
    async fn common_students(&self, teachers: &[String]) -> Result<Vec<StudentId>, CoreError>;

    /// Cheap liveness check of the backing storage.
    async fn health_check(&self) -> Result<(), CoreError>;
}
