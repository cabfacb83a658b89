use sqlx::PgPool;

use crate::models::teacher::Teacher;

/// Lookup of known teacher identifiers.
#[async_trait::async_trait]
pub trait TeacherStore: Send + Sync {
    async fn find(&self, username: &str) -> anyhow::Result<Option<Teacher>>;
}

#[derive(Clone)]
pub struct PgTeacherStore {
    pool: PgPool,
}

impl PgTeacherStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a teacher, or refresh the display name of an existing one.
    pub async fn upsert(
        &self,
        username: &str,
        display_name: Option<&str>,
    ) -> anyhow::Result<Teacher> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (username, display_name)
             VALUES ($1, $2)
             ON CONFLICT (username) DO UPDATE SET
                 display_name = COALESCE(EXCLUDED.display_name, teachers.display_name)
             RETURNING username, display_name, created_at",
        )
        .bind(username)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(teacher)
    }
}

#[async_trait::async_trait]
impl TeacherStore for PgTeacherStore {
    async fn find(&self, username: &str) -> anyhow::Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT username, display_name, created_at FROM teachers WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }
}
