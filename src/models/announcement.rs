use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Its syntax belongs to the store; see
/// [`crate::db::announcements::AnnouncementStore::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementId(pub String);

impl AnnouncementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnouncementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored announcement. Dates are kept as ISO-8601 text exactly as they
/// were submitted and are only parsed when a read needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub message: String,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
    pub created_at: String,
}

/// Body for POST /announcements
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub expiration_date: Option<String>,
    pub start_date: Option<String>,
}

/// Body for PUT /announcements/{id}. Every field is independently optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub expiration_date: Option<String>,
    pub start_date: Option<String>,
}

/// Validated document handed to the store on create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub start_date: Option<String>,
    pub expiration_date: String,
    pub created_at: String,
}

impl NewAnnouncement {
    pub fn into_announcement(self, id: AnnouncementId) -> Announcement {
        Announcement {
            id,
            title: self.title,
            message: self.message,
            start_date: self.start_date,
            expiration_date: Some(self.expiration_date),
            created_at: self.created_at,
        }
    }
}

/// Validated partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
}

impl AnnouncementPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.message.is_none()
            && self.start_date.is_none()
            && self.expiration_date.is_none()
    }

    /// Merge the supplied fields into `target`.
    pub fn apply_to(&self, target: &mut Announcement) {
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(message) = &self.message {
            target.message = message.clone();
        }
        if let Some(start) = &self.start_date {
            target.start_date = Some(start.clone());
        }
        if let Some(exp) = &self.expiration_date {
            target.expiration_date = Some(exp.clone());
        }
    }
}
