//! Rows of the `registrations` and `notification_opt_ins` tables.
//!
//! Both tables share the same shape, so a single row type serves both.

use sqlx::FromRow;

use crate::models::Timestamp;

/// A `(teacher, student)` edge row.
#[derive(Debug, Clone, FromRow)]
pub struct Edge {
    pub id: i64,
    pub teacher: String,
    pub student: String,
    pub created_at: Timestamp,
}
