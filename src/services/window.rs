//! Visibility window evaluation over ISO-8601 text dates.
//!
//! Stored dates are re-parsed on every call; nothing is cached.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Offset-aware shapes RFC 3339 parsing does not cover: basic-format
/// offsets (`+0000`) and minute precision. A trailing `Z` is rewritten to
/// `+00:00` before these run.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Offset-less date-times, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    StartDate,
    ExpirationDate,
}

impl DateField {
    pub fn name(self) -> &'static str {
        match self {
            DateField::StartDate => "start_date",
            DateField::ExpirationDate => "expiration_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    Active { expires_at: DateTime<Utc> },
    Inactive { expires_at: DateTime<Utc> },
    /// Only ever reported for the expiration date; a bad start date is ignored.
    Unparseable(DateField),
}

impl WindowStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, WindowStatus::Active { .. })
    }

    /// Parsed expiration, if there is one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match *self {
            WindowStatus::Active { expires_at } | WindowStatus::Inactive { expires_at } => {
                Some(expires_at)
            }
            WindowStatus::Unparseable(_) => None,
        }
    }
}

/// Parse an ISO-8601 date or date-time. Values without an offset are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let with_offset = match raw.strip_suffix('Z') {
        Some(head) => Cow::Owned(format!("{head}+00:00")),
        None => Cow::Borrowed(raw),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Some(naive) = parse_hour_only(raw) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DDTHH` (or space-separated). chrono formats need a minute.
fn parse_hour_only(raw: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()?;
    let rest = raw.get(10..)?;
    let hour = rest.strip_prefix('T').or_else(|| rest.strip_prefix(' '))?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    date.and_hms_opt(hour.parse().ok()?, 0, 0)
}

/// Decide whether `now` falls inside `[start_date, expiration_date]`.
pub fn evaluate(
    start_date: Option<&str>,
    expiration_date: Option<&str>,
    now: DateTime<Utc>,
) -> WindowStatus {
    let Some(expires_at) = expiration_date.and_then(parse_timestamp) else {
        return WindowStatus::Unparseable(DateField::ExpirationDate);
    };
    let started = start_date
        .and_then(parse_timestamp)
        .map_or(true, |start| start <= now);

    if expires_at >= now && started {
        WindowStatus::Active { expires_at }
    } else {
        WindowStatus::Inactive { expires_at }
    }
}
