//! Repository for the `suspensions` table.

use sqlx::PgPool;

use crate::models::suspension::Suspension;

pub struct SuspensionRepo;

impl SuspensionRepo {
    pub async fn is_suspended(pool: &PgPool, student: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suspensions WHERE student = $1)",
        )
        .bind(student)
        .fetch_one(pool)
        .await
    }

    /// Record a suspension. Returns `None` if the student was already suspended.
    pub async fn insert_if_absent(
        pool: &PgPool,
        student: &str,
    ) -> Result<Option<Suspension>, sqlx::Error> {
        sqlx::query_as::<_, Suspension>(
            "INSERT INTO suspensions (student) VALUES ($1) \
             ON CONFLICT (student) DO NOTHING \
             RETURNING id, student, created_at",
        )
        .bind(student)
        .fetch_optional(pool)
        .await
    }
}
