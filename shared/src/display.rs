//! Display derivation
//!
//! Turns server issues and device-local issues into one normalized
//! [`DisplayIssue`] shape. Provenance is carried by [`IssueId`]: only
//! `IssueId::Remote` has a server identity and can open a detail view.
//!
//! | Rule | Behaviour |
//! |------|-----------|
//! | title | description cut at 50 characters + `...`, `"No description"` when absent |
//! | time | `Just now` (< 1 h or clock skew), `{h}h ago` (< 24 h), `{d}d ago` |
//! | location | `{locality}, {city}`, `Unknown location` if either is missing |
//! | color | RESOLVED green, IN_PROGRESS orange, everything else red |

use crate::models::{IssueRecord, IssueStatus, LocalIssueRecord, NamedRef};
use crate::util::{assume_utc, truncate_chars};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum title length in characters
pub const TITLE_MAX_CHARS: usize = 50;
pub const ELLIPSIS: &str = "...";
pub const NO_DESCRIPTION: &str = "No description";
pub const UNKNOWN_LOCATION: &str = "Unknown location";
pub const JUST_NOW: &str = "Just now";

pub const COLOR_RESOLVED: &str = "#4CAF50";
pub const COLOR_IN_PROGRESS: &str = "#FF9500";
pub const COLOR_PENDING: &str = "#FF6B6B";

/// Identifier of a displayed issue, tagged with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "source", content = "id", rename_all = "snake_case")]
pub enum IssueId {
    /// Server-assigned id
    Remote(i64),
    /// Client-generated id (device cache or placeholder)
    Local(i64),
}

impl IssueId {
    pub fn is_remote(&self) -> bool {
        matches!(self, IssueId::Remote(_))
    }

    /// Server id, if this issue has one
    pub fn remote(&self) -> Option<i64> {
        match self {
            IssueId::Remote(id) => Some(*id),
            IssueId::Local(_) => None,
        }
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueId::Remote(id) => write!(f, "#{}", id),
            IssueId::Local(id) => write!(f, "local-{}", id),
        }
    }
}

/// One card of the issue list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayIssue {
    pub id: IssueId,
    pub image: Option<String>,
    pub title: String,
    pub status: String,
    pub status_color: String,
    pub time: String,
    pub location: String,
}

impl DisplayIssue {
    /// Derive a card from a server issue
    pub fn from_remote(issue: &IssueRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: IssueId::Remote(issue.id),
            image: issue.photo_url.clone(),
            title: title_from_description(issue.description.as_deref()),
            status: issue.status.label().to_string(),
            status_color: status_color(Some(issue.status)).to_string(),
            time: issue
                .created_at
                .map(|created| time_ago(assume_utc(created), now))
                .unwrap_or_else(|| JUST_NOW.to_string()),
            location: location_label(issue.locality.as_ref(), issue.city.as_ref()),
        }
    }

    /// Derive a card from a device-local issue
    pub fn from_local(record: &LocalIssueRecord, now: DateTime<Utc>) -> Self {
        let location = if record.location.trim().is_empty() {
            UNKNOWN_LOCATION.to_string()
        } else {
            record.location.clone()
        };

        Self {
            id: IssueId::Local(record.id),
            image: record.image.clone(),
            title: record.title.clone(),
            status: record.status.clone(),
            status_color: status_color(IssueStatus::from_label(&record.status)).to_string(),
            time: time_ago(record.timestamp, now),
            location,
        }
    }

    pub fn is_navigable(&self) -> bool {
        self.id.is_remote()
    }
}

/// Title shown on a card: first 50 characters of the description
pub fn title_from_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let (head, truncated) = truncate_chars(text, TITLE_MAX_CHARS);
            if truncated {
                format!("{}{}", head, ELLIPSIS)
            } else {
                head.to_string()
            }
        }
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// Badge color for a status; unknown statuses render as pending
pub fn status_color(status: Option<IssueStatus>) -> &'static str {
    match status {
        Some(IssueStatus::Resolved) => COLOR_RESOLVED,
        Some(IssueStatus::InProgress) => COLOR_IN_PROGRESS,
        _ => COLOR_PENDING,
    }
}

/// Relative age label, floored to whole hours/days
pub fn time_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - created).num_hours();
    if hours < 1 {
        return JUST_NOW.to_string();
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// `{locality}, {city}` when both are known
pub fn location_label(locality: Option<&NamedRef>, city: Option<&NamedRef>) -> String {
    match (locality, city) {
        (Some(locality), Some(city)) => format!("{}, {}", locality.name, city.name),
        _ => UNKNOWN_LOCATION.to_string(),
    }
}
