use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::{
    metrics::{record_mutation, ACTIVE_GAUGE},
    validation::{validate_create, validate_id, validate_update},
    visibility::{order_for_management, select_active},
};
use crate::{
    db::announcements::AnnouncementStore,
    error::ServiceError,
    models::announcement::{
        Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest,
    },
};

/// Read and write operations over announcements. Holds no state besides the
/// store handle; authorization is the caller's job.
#[derive(Clone)]
pub struct AnnouncementService {
    store: Arc<dyn AnnouncementStore>,
}

impl AnnouncementService {
    pub fn new(store: Arc<dyn AnnouncementStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }

    /// Public view: announcements active at `now`, soonest-expiring first.
    pub async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Announcement>, ServiceError> {
        let records = self.store.list().await?;
        let active = select_active(records, now);
        ACTIVE_GAUGE.set(active.len() as f64);
        Ok(active)
    }

    /// Management view: everything, unparseable expirations last.
    pub async fn list_all(&self) -> Result<Vec<Announcement>, ServiceError> {
        let records = self.store.list().await?;
        Ok(order_for_management(records))
    }

    pub async fn create(
        &self,
        req: CreateAnnouncementRequest,
        now: DateTime<Utc>,
    ) -> Result<Announcement, ServiceError> {
        let result = self.try_create(req, now).await;
        record_mutation("create", &result);
        result
    }

    async fn try_create(
        &self,
        req: CreateAnnouncementRequest,
        now: DateTime<Utc>,
    ) -> Result<Announcement, ServiceError> {
        let doc = validate_create(req, now)?;
        let id = self.store.create(&doc).await?;
        info!("Created announcement {id}");
        Ok(doc.into_announcement(id))
    }

    pub async fn update(
        &self,
        raw_id: &str,
        req: UpdateAnnouncementRequest,
    ) -> Result<Announcement, ServiceError> {
        let result = self.try_update(raw_id, req).await;
        record_mutation("update", &result);
        result
    }

    async fn try_update(
        &self,
        raw_id: &str,
        req: UpdateAnnouncementRequest,
    ) -> Result<Announcement, ServiceError> {
        let id = validate_id(self.store.as_ref(), raw_id)?;
        let patch = validate_update(req)?;
        let updated = self
            .store
            .update(&id, &patch)
            .await?
            .ok_or(ServiceError::NotFound)?;
        info!("Updated announcement {id}");
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let result = self.try_delete(raw_id).await;
        record_mutation("delete", &result);
        result
    }

    async fn try_delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = validate_id(self.store.as_ref(), raw_id)?;
        if !self.store.delete(&id).await? {
            return Err(ServiceError::NotFound);
        }
        info!("Deleted announcement {id}");
        Ok(())
    }
}
