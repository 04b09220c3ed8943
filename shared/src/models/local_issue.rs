//! Device-local issue record
//!
//! Stored as a JSON array under the `userIssues` cache key, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue submitted on this device, possibly never confirmed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalIssueRecord {
    /// Client-generated id (millisecond timestamp)
    pub id: i64,
    /// Photo reference (URI handed over by the picker)
    pub image: Option<String>,
    /// Truncated description
    pub title: String,
    /// Status label, "Pending" at creation
    pub status: String,
    /// Free-text address
    pub location: String,
    /// Raw description as typed
    pub notes: String,
    /// "Lat: {lat} N, Lon: {lon} W"
    pub coordinates: String,
    /// Submission time
    pub timestamp: DateTime<Utc>,
    /// Server id once the submission was confirmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<i64>,
    // Legacy display fields written by older clients; read and ignored
    #[serde(default, skip_serializing)]
    pub status_color: Option<String>,
    #[serde(default, skip_serializing)]
    pub time: Option<String>,
}

impl LocalIssueRecord {
    /// Whether the server has already assigned an id to this record
    pub fn is_synced(&self) -> bool {
        self.remote_id.is_some()
    }
}
