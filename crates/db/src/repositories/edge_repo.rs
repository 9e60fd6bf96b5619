//! Repository for the `registrations` and `notification_opt_ins` tables.
//!
//! Both are `(teacher, student)` edge tables with a unique constraint on the
//! pair, so the same queries run against either, selected by [`EdgeSet`].

use classroom_core::store::EdgeSet;
use sqlx::PgPool;

use crate::models::edge::Edge;

/// Column list for edge queries.
const EDGE_COLUMNS: &str = "id, teacher, student, created_at";

/// Table backing each edge set. Never derived from request data.
fn table_for(set: EdgeSet) -> &'static str {
    match set {
        EdgeSet::Registration => "registrations",
        EdgeSet::NotificationOptIn => "notification_opt_ins",
    }
}

/// Provides existence checks, idempotent inserts, and listing for edges.
pub struct EdgeRepo;

impl EdgeRepo {
    pub async fn exists(
        pool: &PgPool,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE teacher = $1 AND student = $2)",
            table_for(set)
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(teacher)
            .bind(student)
            .fetch_one(pool)
            .await
    }

    /// Insert the edge unless it exists.
    ///
    /// Uses `ON CONFLICT DO NOTHING` so racing inserts of the same pair both
    /// succeed. Returns the new row, or `None` if the pair was already present.
    pub async fn insert_if_absent(
        pool: &PgPool,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<Option<Edge>, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (teacher, student) VALUES ($1, $2) \
             ON CONFLICT (teacher, student) DO NOTHING \
             RETURNING {EDGE_COLUMNS}",
            table_for(set)
        );
        sqlx::query_as::<_, Edge>(&query)
            .bind(teacher)
            .bind(student)
            .fetch_optional(pool)
            .await
    }

    /// Students linked to `teacher`, ordered by student id.
    pub async fn list_students(
        pool: &PgPool,
        set: EdgeSet,
        teacher: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let query = format!(
            "SELECT student FROM {} WHERE teacher = $1 ORDER BY student",
            table_for(set)
        );
        sqlx::query_scalar::<_, String>(&query)
            .bind(teacher)
            .fetch_all(pool)
            .await
    }

    /// Students linked to `teacher` who have no suspension, ordered by
    /// student id. One round trip.
    pub async fn list_unsuspended_students(
        pool: &PgPool,
        set: EdgeSet,
        teacher: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let query = format!(
            "SELECT e.student FROM {} e \
             WHERE e.teacher = $1 \
               AND NOT EXISTS (SELECT 1 FROM suspensions s WHERE s.student = e.student) \
             ORDER BY e.student",
            table_for(set)
        );
        sqlx::query_scalar::<_, String>(&query)
            .bind(teacher)
            .fetch_all(pool)
            .await
    }
}
