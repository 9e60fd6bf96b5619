//! PostgreSQL implementation of the [`RosterStore`] collaborator.

use async_trait::async_trait;
use classroom_core::error::CoreError;
use classroom_core::store::{EdgeSet, RosterStore};
use classroom_core::types::StudentId;

use crate::repositories::{EdgeRepo, RegistrationRepo, SuspensionRepo};
use crate::DbPool;

/// [`RosterStore`] backed by a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgRosterStore {
    pool: DbPool,
}

impl PgRosterStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Log the driver error and turn it into a caller-safe persistence error.
fn persistence(context: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(error = %err, context, "Database error");
        CoreError::Persistence(context.to_string())
    }
}

#[async_trait]
impl RosterStore for PgRosterStore {
    async fn edge_exists(
        &self,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<bool, CoreError> {
        EdgeRepo::exists(&self.pool, set, teacher, student)
            .await
            .map_err(persistence("Failed to look up student"))
    }

    async fn insert_edge_if_absent(
        &self,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<bool, CoreError> {
        let inserted = EdgeRepo::insert_if_absent(&self.pool, set, teacher, student)
            .await
            .map_err(persistence("Failed to save student"))?;

        if let Some(edge) = &inserted {
            tracing::debug!(
                edge_id = edge.id,
                set = set.as_str(),
                teacher,
                student,
                "Edge created"
            );
        }
        Ok(inserted.is_some())
    }

    async fn edges_by_source(
        &self,
        set: EdgeSet,
        teacher: &str,
    ) -> Result<Vec<StudentId>, CoreError> {
        EdgeRepo::list_students(&self.pool, set, teacher)
            .await
            .map_err(persistence("Failed to retrieve students"))
    }

    async fn unsuspended_by_source(
        &self,
        set: EdgeSet,
        teacher: &str,
    ) -> Result<Vec<StudentId>, CoreError> {
        EdgeRepo::list_unsuspended_students(&self.pool, set, teacher)
            .await
            .map_err(persistence("Failed to retrieve students for notifications"))
    }

    async fn is_suspended(&self, student: &str) -> Result<bool, CoreError> {
        SuspensionRepo::is_suspended(&self.pool, student)
            .await
            .map_err(persistence("Failed to look up suspension"))
    }

    async fn suspend(&self, student: &str) -> Result<bool, CoreError> {
        let inserted = SuspensionRepo::insert_if_absent(&self.pool, student)
            .await
            .map_err(persistence("Failed to suspend student"))?;

        if let Some(suspension) = &inserted {
            tracing::debug!(suspension_id = suspension.id, student, "Suspension created");
        }
        Ok(inserted.is_some())
    }

    async fn common_students(&self, teachers: &[String]) -> Result<Vec<StudentId>, CoreError> {
        RegistrationRepo::common_students(&self.pool, teachers)
            .await
            .map_err(persistence("Failed to get common students"))
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(persistence("Database health check failed"))
    }
}
