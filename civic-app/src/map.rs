//! Map flow
//!
//! With a known position, issues within [`NEARBY_RADIUS_KM`] are requested
//! first and the full list is the fallback. Every issue carries its distance
//! from the position when one is known.

use civic_client::{ClientResult, IssueApi};
use shared::geo::{distance_km, is_valid_coordinate};
use shared::models::{IssueCategory, IssueRecord};
use std::sync::Arc;

pub const NEARBY_RADIUS_KM: f64 = 20.0;

/// Map center used before the user position is known
pub const DEFAULT_CENTER: Position = Position {
    latitude: 34.0522,
    longitude: -118.2437,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Issue placed on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapIssue {
    pub issue: IssueRecord,
    /// Kilometres from the user, when the position is known
    pub distance_km: Option<f64>,
}

impl MapIssue {
    pub fn marker_color(&self) -> &'static str {
        self.issue.category.marker_color()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(IssueCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: IssueCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
        }
    }
}

/// Link opening a coordinate in the platform maps app
pub fn maps_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        latitude, longitude
    )
}

pub struct MapView<A: IssueApi + ?Sized> {
    api: Arc<A>,
    position: Option<Position>,
    issues: Vec<MapIssue>,
}

impl<A: IssueApi + ?Sized> MapView<A> {
    pub fn new(api: Arc<A>, position: Option<Position>) -> Self {
        Self {
            api,
            position,
            issues: Vec::new(),
        }
    }

    pub fn center(&self) -> Position {
        self.position.unwrap_or(DEFAULT_CENTER)
    }

    /// Fetch issues for the map; the previous list is kept on failure
    pub async fn load(&mut self) -> ClientResult<&[MapIssue]> {
        let issues = match self.position {
            Some(position) => {
                match self
                    .api
                    .list_nearby(position.latitude, position.longitude, NEARBY_RADIUS_KM)
                    .await
                {
                    Ok(issues) => issues,
                    Err(e) => {
                        tracing::warn!(error = %e, "Nearby lookup failed, loading all issues");
                        self.api.list_issues().await?
                    }
                }
            }
            None => self.api.list_issues().await?,
        };

        self.issues = issues
            .into_iter()
            .map(|issue| MapIssue {
                distance_km: self
                    .position
                    .filter(|_| is_valid_coordinate(issue.latitude, issue.longitude))
                    .map(|p| distance_km(p.latitude, p.longitude, issue.latitude, issue.longitude)),
                issue,
            })
            .collect();

        tracing::info!(count = self.issues.len(), "Map issues loaded");
        Ok(&self.issues)
    }

    pub fn issues(&self) -> &[MapIssue] {
        &self.issues
    }

    pub fn filtered(&self, filter: CategoryFilter) -> impl Iterator<Item = &MapIssue> {
        self.issues
            .iter()
            .filter(move |m| filter.matches(m.issue.category))
    }
}
