use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A teacher allowed to manage announcements.
#[derive(Debug, Clone, FromRow)]
pub struct Teacher {
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Extracted by the credential gate, available to management handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub username: String,
    pub display_name: Option<String>,
}

impl From<Teacher> for Principal {
    fn from(t: Teacher) -> Self {
        Principal {
            username: t.username,
            display_name: t.display_name,
        }
    }
}
