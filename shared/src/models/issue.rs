//! Issue Model

use crate::types::ParseEnumError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Category
// ============================================================================

/// Fixed classification of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCategory {
    Roads,
    Sanitation,
    Lighting,
    Waste,
    Water,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 5] = [
        IssueCategory::Roads,
        IssueCategory::Sanitation,
        IssueCategory::Lighting,
        IssueCategory::Waste,
        IssueCategory::Water,
    ];

    /// Wire name, as used in paths and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Roads => "ROADS",
            IssueCategory::Sanitation => "SANITATION",
            IssueCategory::Lighting => "LIGHTING",
            IssueCategory::Waste => "WASTE",
            IssueCategory::Water => "WATER",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Roads => "Roads",
            IssueCategory::Sanitation => "Sanitation",
            IssueCategory::Lighting => "Lighting",
            IssueCategory::Waste => "Waste",
            IssueCategory::Water => "Water",
        }
    }

    /// Map marker / badge color
    pub fn marker_color(&self) -> &'static str {
        match self {
            IssueCategory::Roads => "#795548",
            IssueCategory::Sanitation => "#607D8B",
            IssueCategory::Lighting => "#FFC107",
            IssueCategory::Waste => "#4CAF50",
            IssueCategory::Water => "#2196F3",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IssueCategory {
    type Err = ParseEnumError;

    /// Accepts the wire name or the label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        IssueCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseEnumError::new("category", s))
    }
}

// ============================================================================
// Status
// ============================================================================

/// Lifecycle stage of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Submitted,
    InProgress,
    Resolved,
    Rejected,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Submitted,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Submitted => "SUBMITTED",
            IssueStatus::InProgress => "IN_PROGRESS",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::Rejected => "REJECTED",
        }
    }

    /// Display label (SUBMITTED is shown as "Pending")
    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::Submitted => "Pending",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Rejected => "Rejected",
        }
    }

    /// Resolve either a wire name or a display label
    pub fn from_label(label: &str) -> Option<Self> {
        let needle = label.trim();
        IssueStatus::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(needle) || s.label().eq_ignore_ascii_case(needle))
    }

    /// Map marker / detail badge color
    pub fn marker_color(&self) -> &'static str {
        match self {
            IssueStatus::Submitted => "#FFA726",
            IssueStatus::InProgress => "#42A5F5",
            IssueStatus::Resolved => "#66BB6A",
            IssueStatus::Rejected => "#EF5350",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueStatus::from_label(s).ok_or_else(|| ParseEnumError::new("status", s))
    }
}

// ============================================================================
// Issue Record
// ============================================================================

/// `{id, name}` reference to a city, locality or department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// Issue as returned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub id: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub category: IssueCategory,
    pub status: IssueStatus,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Server local time without offset (treated as UTC)
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    /// Only set once the issue is RESOLVED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub city: Option<NamedRef>,
    #[serde(default)]
    pub locality: Option<NamedRef>,
    #[serde(default)]
    pub department: Option<NamedRef>,
}

/// Create issue payload
///
/// The city/locality routing pair travels in the request path, not the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    pub description: String,
    pub category: IssueCategory,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_record_from_server_json() {
        let json = r#"{
            "id": 7,
            "description": "Pothole near the school",
            "category": "ROADS",
            "status": "IN_PROGRESS",
            "latitude": 34.0522,
            "longitude": -118.2437,
            "photoUrl": null,
            "createdAt": "2024-03-01T08:15:30.123456",
            "updatedAt": "2024-03-02T09:00:00",
            "city": {"id": 1, "name": "Springfield"},
            "locality": {"id": 3, "name": "Downtown"},
            "department": null
        }"#;

        let issue: IssueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 7);
        assert_eq!(issue.category, IssueCategory::Roads);
        assert_eq!(issue.status, IssueStatus::InProgress);
        assert!(issue.photo_url.is_none());
        assert!(issue.created_at.is_some());
        assert_eq!(issue.locality.as_ref().map(|l| l.name.as_str()), Some("Downtown"));
        assert!(issue.department.is_none());
    }

    #[test]
    fn test_create_request_omits_missing_photo() {
        let req = CreateIssueRequest {
            description: "Broken light".into(),
            category: IssueCategory::Lighting,
            latitude: 1.0,
            longitude: 2.0,
            photo_url: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["category"], "LIGHTING");
        assert!(value.get("photoUrl").is_none());
    }

    #[test]
    fn test_status_labels_and_parsing() {
        assert_eq!(IssueStatus::Submitted.label(), "Pending");
        assert_eq!(IssueStatus::from_label("Pending"), Some(IssueStatus::Submitted));
        assert_eq!(IssueStatus::from_label("in progress"), Some(IssueStatus::InProgress));
        assert_eq!("RESOLVED".parse::<IssueStatus>(), Ok(IssueStatus::Resolved));
        assert!("CLOSED".parse::<IssueStatus>().is_err());
    }

    #[test]
    fn test_category_parsing_accepts_labels() {
        assert_eq!("water".parse::<IssueCategory>(), Ok(IssueCategory::Water));
        assert_eq!("SANITATION".parse::<IssueCategory>(), Ok(IssueCategory::Sanitation));
        assert!("Parks".parse::<IssueCategory>().is_err());
    }
}
