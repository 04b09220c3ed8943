//! Analytics Models (leaderboards, summaries, time series)

use crate::types::ParseEnumError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Leaderboard ordering metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metric {
    Active,
    Resolved,
    #[default]
    Total,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Active => "ACTIVE",
            Metric::Resolved => "RESOLVED",
            Metric::Total => "TOTAL",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Metric::Active),
            "RESOLVED" => Ok(Metric::Resolved),
            "TOTAL" => Ok(Metric::Total),
            _ => Err(ParseEnumError::new("metric", s)),
        }
    }
}

/// Active/resolved counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSummary {
    pub active: u64,
    pub resolved: u64,
}

impl CountSummary {
    pub fn total(&self) -> u64 {
        self.active + self.resolved
    }
}

/// One row of a city/locality/department leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub id: i64,
    pub name: String,
    pub active: u64,
    pub resolved: u64,
}

impl LeaderboardRow {
    pub fn total(&self) -> u64 {
        self.active + self.resolved
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummary {
    pub city_id: i64,
    pub city_name: String,
    pub counts: CountSummary,
    /// None if no issue was resolved yet
    pub average_resolution_hours: Option<f64>,
    /// resolved / (active + resolved)
    pub resolution_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalitySummary {
    pub locality_id: i64,
    pub locality_name: String,
    pub counts: CountSummary,
    pub average_resolution_hours: Option<f64>,
    pub resolution_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub department_id: i64,
    pub department_name: String,
    pub counts: CountSummary,
    pub average_resolution_hours: Option<f64>,
    pub resolution_rate: Option<f64>,
}

/// Daily count of newly reported issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub count: u64,
}
