//! Checks applied to create/update payloads before anything reaches the store.

use chrono::{DateTime, SecondsFormat, Utc};

use super::window::{parse_timestamp, DateField};
use crate::{
    db::announcements::AnnouncementStore,
    error::ServiceError,
    models::announcement::{
        AnnouncementId, AnnouncementPatch, CreateAnnouncementRequest, NewAnnouncement,
        UpdateAnnouncementRequest,
    },
};

fn check_date(field: DateField, raw: &str) -> Result<(), ServiceError> {
    match parse_timestamp(raw) {
        Some(_) => Ok(()),
        None => Err(ServiceError::validation(format!(
            "Invalid {} format. Use ISO format (YYYY-MM-DD or full ISO)",
            field.name()
        ))),
    }
}

fn check_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::validation("title must not be empty"));
    }
    Ok(())
}

pub fn validate_create(
    req: CreateAnnouncementRequest,
    now: DateTime<Utc>,
) -> Result<NewAnnouncement, ServiceError> {
    let title = req
        .title
        .ok_or_else(|| ServiceError::validation("title is required"))?;
    check_title(&title)?;
    let message = req
        .message
        .ok_or_else(|| ServiceError::validation("message is required"))?;
    let expiration_date = req
        .expiration_date
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServiceError::validation("expiration_date is required"))?;
    check_date(DateField::ExpirationDate, &expiration_date)?;

    let start_date = req.start_date.filter(|s| !s.is_empty());
    if let Some(start) = &start_date {
        check_date(DateField::StartDate, start)?;
    }

    Ok(NewAnnouncement {
        title,
        message,
        start_date,
        expiration_date,
        created_at: now.to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

pub fn validate_update(req: UpdateAnnouncementRequest) -> Result<AnnouncementPatch, ServiceError> {
    if let Some(title) = &req.title {
        check_title(title)?;
    }
    if let Some(exp) = &req.expiration_date {
        check_date(DateField::ExpirationDate, exp)?;
    }
    if let Some(start) = &req.start_date {
        check_date(DateField::StartDate, start)?;
    }

    let patch = AnnouncementPatch {
        title: req.title,
        message: req.message,
        start_date: req.start_date,
        expiration_date: req.expiration_date,
    };
    if patch.is_empty() {
        return Err(ServiceError::validation("No fields to update"));
    }
    Ok(patch)
}

/// Reject ids the store could never have issued, before querying it.
pub fn validate_id(store: &dyn AnnouncementStore, raw: &str) -> Result<AnnouncementId, ServiceError> {
    let id = AnnouncementId(raw.to_string());
    if !store.is_well_formed(&id) {
        return Err(ServiceError::IdentifierMalformed);
    }
    Ok(id)
}
