//! Active-subset selection and management ordering.
//!
//! Both orderings are stable sorts on the parsed expiration, so records that
//! expire at the same instant keep the order the store returned them in.

use chrono::{DateTime, Utc};

use super::window::{evaluate, parse_timestamp};
use crate::models::announcement::Announcement;

/// Announcements active at `now`, soonest-expiring first.
pub fn select_active(records: Vec<Announcement>, now: DateTime<Utc>) -> Vec<Announcement> {
    let mut active: Vec<(DateTime<Utc>, Announcement)> = records
        .into_iter()
        .filter_map(|a| {
            let status = evaluate(a.start_date.as_deref(), a.expiration_date.as_deref(), now);
            match status.expires_at() {
                Some(expires_at) if status.is_active() => Some((expires_at, a)),
                _ => None,
            }
        })
        .collect();

    active.sort_by_key(|(expires_at, _)| *expires_at);
    active.into_iter().map(|(_, a)| a).collect()
}

/// Every announcement, soonest-expiring first. Records with a missing or
/// unparseable expiration sort after all others.
pub fn order_for_management(records: Vec<Announcement>) -> Vec<Announcement> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, Announcement)> = records
        .into_iter()
        .map(|a| (a.expiration_date.as_deref().and_then(parse_timestamp), a))
        .collect();

    keyed.sort_by_key(|(expires_at, _)| (expires_at.is_none(), *expires_at));
    keyed.into_iter().map(|(_, a)| a).collect()
}
