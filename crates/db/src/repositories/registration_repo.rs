//! Cross-teacher queries over the `registrations` table.

use sqlx::PgPool;

pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Students registered under every teacher in `teachers`.
    ///
    /// `teachers` must not contain duplicates, since the match count is
    /// compared against its length.
    pub async fn common_students(
        pool: &PgPool,
        teachers: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        let teacher_count = i64::try_from(teachers.len()).unwrap_or(i64::MAX);
        sqlx::query_scalar::<_, String>(
            "SELECT student FROM registrations \
             WHERE teacher = ANY($1) \
             GROUP BY student \
             HAVING COUNT(DISTINCT teacher) = $2 \
             ORDER BY student",
        )
        .bind(teachers)
        .bind(teacher_count)
        .fetch_all(pool)
        .await
    }
}
