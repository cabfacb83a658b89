use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::announcement::{
    Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement,
};

/// CRUD façade over the announcement collection. Returns raw, unordered data;
/// filtering and ordering live in the visibility engine.
#[async_trait::async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Whether `id` matches this store's identifier syntax.
    fn is_well_formed(&self, id: &AnnouncementId) -> bool;

    async fn create(&self, doc: &NewAnnouncement) -> anyhow::Result<AnnouncementId>;

    async fn get(&self, id: &AnnouncementId) -> anyhow::Result<Option<Announcement>>;

    /// All records in fetch (insertion) order.
    async fn list(&self) -> anyhow::Result<Vec<Announcement>>;

    /// Apply `patch` and return the post-update record, or `None` if `id` is unknown.
    async fn update(
        &self,
        id: &AnnouncementId,
        patch: &AnnouncementPatch,
    ) -> anyhow::Result<Option<Announcement>>;

    /// Returns `false` if nothing was deleted.
    async fn delete(&self, id: &AnnouncementId) -> anyhow::Result<bool>;

    async fn ping(&self) -> anyhow::Result<()>;
}

#[derive(Debug, FromRow)]
struct AnnouncementRow {
    id: Uuid,
    title: String,
    message: String,
    start_date: Option<String>,
    expiration_date: Option<String>,
    created_at: String,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Announcement {
            id: AnnouncementId(row.id.to_string()),
            title: row.title,
            message: row.message,
            start_date: row.start_date,
            expiration_date: row.expiration_date,
            created_at: row.created_at,
        }
    }
}

const COLUMNS: &str = "id, title, message, start_date, expiration_date, created_at";

/// Postgres-backed store. Dates live in TEXT columns; parsing and validation
/// happen above the store.
#[derive(Clone)]
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    fn is_well_formed(&self, id: &AnnouncementId) -> bool {
        Uuid::parse_str(id.as_str()).is_ok()
    }

    async fn create(&self, doc: &NewAnnouncement) -> anyhow::Result<AnnouncementId> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO announcements (title, message, start_date, expiration_date, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&doc.title)
        .bind(&doc.message)
        .bind(&doc.start_date)
        .bind(&doc.expiration_date)
        .bind(&doc.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(AnnouncementId(id.to_string()))
    }

    async fn get(&self, id: &AnnouncementId) -> anyhow::Result<Option<Announcement>> {
        let Ok(uuid) = Uuid::parse_str(id.as_str()) else {
            return Ok(None);
        };
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Announcement::from))
    }

    async fn list(&self) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {COLUMNS} FROM announcements ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn update(
        &self,
        id: &AnnouncementId,
        patch: &AnnouncementPatch,
    ) -> anyhow::Result<Option<Announcement>> {
        let Ok(uuid) = Uuid::parse_str(id.as_str()) else {
            return Ok(None);
        };
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "UPDATE announcements
             SET title = COALESCE($1, title),
                 message = COALESCE($2, message),
                 start_date = COALESCE($3, start_date),
                 expiration_date = COALESCE($4, expiration_date)
             WHERE id = $5
             RETURNING {COLUMNS}"
        ))
        .bind(&patch.title)
        .bind(&patch.message)
        .bind(&patch.start_date)
        .bind(&patch.expiration_date)
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Announcement::from))
    }

    async fn delete(&self, id: &AnnouncementId) -> anyhow::Result<bool> {
        let Ok(uuid) = Uuid::parse_str(id.as_str()) else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
