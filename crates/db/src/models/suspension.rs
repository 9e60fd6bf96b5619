use sqlx::FromRow;

use crate::models::Timestamp;

/// A row from the `suspensions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Suspension {
    pub id: i64,
    pub student: String,
    pub created_at: Timestamp,
}
