//! In-process stores for local runs (`STORE_BACKEND=memory`) and tests.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{announcements::AnnouncementStore, teachers::TeacherStore};
use crate::models::{
    announcement::{Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement},
    teacher::Teacher,
};

/// UUIDs compare by value, so case and hyphenation differences still match.
fn same_id(stored: &AnnouncementId, wanted: &AnnouncementId) -> bool {
    match (
        Uuid::parse_str(stored.as_str()),
        Uuid::parse_str(wanted.as_str()),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => stored == wanted,
    }
}

#[derive(Default)]
pub struct MemoryStore {
    announcements: RwLock<Vec<Announcement>>,
    teachers: RwLock<HashMap<String, Teacher>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_teacher(&self, username: &str, display_name: Option<&str>) {
        let teacher = Teacher {
            username: username.to_string(),
            display_name: display_name.map(str::to_string),
            created_at: Utc::now(),
        };
        self.teachers
            .write()
            .await
            .insert(username.to_string(), teacher);
    }

    /// Insert a record verbatim, bypassing validation. Lets callers stage
    /// rows that were corrupted by earlier writes.
    pub async fn insert_raw(&self, announcement: Announcement) {
        self.announcements.write().await.push(announcement);
    }
}

#[async_trait::async_trait]
impl AnnouncementStore for MemoryStore {
    fn is_well_formed(&self, id: &AnnouncementId) -> bool {
        Uuid::parse_str(id.as_str()).is_ok()
    }

    async fn create(&self, doc: &NewAnnouncement) -> anyhow::Result<AnnouncementId> {
        let id = AnnouncementId(Uuid::new_v4().to_string());
        self.announcements
            .write()
            .await
            .push(doc.clone().into_announcement(id.clone()));
        Ok(id)
    }

    async fn get(&self, id: &AnnouncementId) -> anyhow::Result<Option<Announcement>> {
        let rows = self.announcements.read().await;
        Ok(rows.iter().find(|a| same_id(&a.id, id)).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Announcement>> {
        Ok(self.announcements.read().await.clone())
    }

    async fn update(
        &self,
        id: &AnnouncementId,
        patch: &AnnouncementPatch,
    ) -> anyhow::Result<Option<Announcement>> {
        let mut rows = self.announcements.write().await;
        Ok(rows.iter_mut().find(|a| same_id(&a.id, id)).map(|a| {
            patch.apply_to(a);
            a.clone()
        }))
    }

    async fn delete(&self, id: &AnnouncementId) -> anyhow::Result<bool> {
        let mut rows = self.announcements.write().await;
        let before = rows.len();
        rows.retain(|a| !same_id(&a.id, id));
        Ok(rows.len() != before)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl TeacherStore for MemoryStore {
    async fn find(&self, username: &str) -> anyhow::Result<Option<Teacher>> {
        Ok(self.teachers.read().await.get(username).cloned())
    }
}
